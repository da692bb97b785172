//! 单个 RFP 视图的生命周期控制器
//!
//! 负责 create / send / evaluate 三个动作, 驱动回复轮询, 并用服务端数据校准本地副本.
//! 任何动作失败都不改变本地状态.

use super::lifecycle;
use super::poller::{self, PollHandle};
use super::view::{self, SharedView, ViewState};
use crate::api::RfpApi;
use crate::config::DEFAULT_POLL_INTERVAL;
use crate::error::{ClientError, Result};
use crate::models::{Evaluation, Rfp, RfpCreate, RfpStatus, VendorResponse};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

pub struct RfpController {
    api: Arc<dyn RfpApi>,
    view: SharedView,
    poller: Mutex<Option<PollHandle>>,
    poll_interval: Duration,
    busy: AtomicBool,
}

impl RfpController {
    /// 校验通过后创建 RFP, 校验失败不发请求
    pub async fn create(api: Arc<dyn RfpApi>, req: RfpCreate) -> Result<Self> {
        req.validate()?;
        let rfp = api.create_rfp(&req).await?;
        info!("RFP {} created in {}", rfp.rfp_id, rfp.rfp_status);
        Ok(Self::attach(api, rfp, DEFAULT_POLL_INTERVAL))
    }

    /// 打开已有 RFP: 非 DRAFT 时加载回复, SENT 时开始轮询
    pub async fn open(api: Arc<dyn RfpApi>, rfp_id: i64, poll_interval: Duration) -> Result<Self> {
        let rfp = api.get_rfp(rfp_id).await?;
        let controller = Self::attach(api, rfp, poll_interval);
        if controller.status() != RfpStatus::Draft {
            // 回复加载失败不影响打开, SENT 时轮询会继续补齐
            if let Err(e) = controller.refresh_responses().await {
                warn!("RFP {} initial response fetch failed: {}", rfp_id, e);
            }
        }
        Ok(controller)
    }

    /// 以已有数据建立视图 (需要在 tokio 运行时内调用)
    pub fn attach(api: Arc<dyn RfpApi>, rfp: Rfp, poll_interval: Duration) -> Self {
        let controller = Self {
            api,
            view: ViewState::shared(rfp),
            poller: Mutex::new(None),
            poll_interval,
            busy: AtomicBool::new(false),
        };
        controller.sync_poller();
        controller
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.stop_polling();
        self.sync_poller();
        self
    }

    pub fn rfp(&self) -> Rfp {
        view::lock(&self.view).rfp().clone()
    }

    pub fn rfp_id(&self) -> i64 {
        view::lock(&self.view).rfp_id()
    }

    pub fn status(&self) -> RfpStatus {
        view::lock(&self.view).status()
    }

    pub fn responses(&self) -> Vec<VendorResponse> {
        view::lock(&self.view).responses().to_vec()
    }

    pub fn evaluation(&self) -> Option<Evaluation> {
        view::lock(&self.view).evaluation().cloned()
    }

    /// 本地状态变化计数
    pub fn revision(&self) -> u64 {
        view::lock(&self.view).revision()
    }

    pub fn is_polling(&self) -> bool {
        self.poller_slot()
            .as_ref()
            .is_some_and(PollHandle::is_active)
    }

    pub fn is_closed(&self) -> bool {
        view::lock(&self.view).is_closed()
    }

    /// DRAFT -> SENT
    pub async fn send(&self, vendor_ids: &[i64]) -> Result<()> {
        let _guard = self.begin_action()?;
        let (rfp_id, vendor_ids) = {
            let state = view::lock(&self.view);
            (state.rfp_id(), lifecycle::check_send(state.status(), vendor_ids)?)
        };

        self.api.send_rfp(rfp_id, &vendor_ids).await?;
        info!("RFP {} sent to {} vendor(s)", rfp_id, vendor_ids.len());

        view::lock(&self.view).set_status(RfpStatus::Sent);
        self.sync_poller();
        Ok(())
    }

    /// SENT -> EVALUATED, 需要本地至少有一条回复
    pub async fn evaluate(&self) -> Result<Evaluation> {
        let _guard = self.begin_action()?;
        let (rfp_id, next) = {
            let state = view::lock(&self.view);
            (
                state.rfp_id(),
                lifecycle::check_evaluate(state.status(), state.responses().len())?,
            )
        };

        let evaluation = self.api.evaluate_rfp(rfp_id).await?;
        info!(
            "RFP {} evaluated, best vendor: {:?}",
            rfp_id, evaluation.best_vendor_id
        );

        {
            let mut state = view::lock(&self.view);
            state.set_evaluation(evaluation.clone());
            state.set_status(next);
        }
        self.sync_poller();

        // 评估会回写分数, 重新拉取一次以校准
        if let Err(e) = self.reload().await {
            warn!("RFP {} reload after evaluation failed: {}", rfp_id, e);
        }
        Ok(evaluation)
    }

    /// 拉取一次回复; 返回结果是否被应用 (过期结果会被丢弃)
    pub async fn refresh_responses(&self) -> Result<bool> {
        let (rfp_id, seq) = {
            let mut state = view::lock(&self.view);
            let seq = state.begin_fetch().ok_or(ClientError::Closed)?;
            (state.rfp_id(), seq)
        };
        let responses = self.api.list_responses(rfp_id).await?;
        Ok(view::lock(&self.view).apply_responses(seq, responses))
    }

    /// 重新拉取 RFP 与回复并校准本地状态
    pub async fn reload(&self) -> Result<()> {
        let rfp_id = self.rfp_id();
        if self.is_closed() {
            return Err(ClientError::Closed);
        }
        let rfp = self.api.get_rfp(rfp_id).await?;
        view::lock(&self.view).reconcile(rfp);
        if self.status() != RfpStatus::Draft {
            self.refresh_responses().await?;
        }
        self.sync_poller();
        Ok(())
    }

    /// 删除 RFP 并关闭视图
    pub async fn delete(&self) -> Result<()> {
        let _guard = self.begin_action()?;
        let rfp_id = self.rfp_id();
        self.api.delete_rfp(rfp_id).await?;
        info!("RFP {} deleted", rfp_id);
        self.teardown();
        Ok(())
    }

    /// 关闭视图: 停止轮询, 之后返回的结果全部丢弃
    pub fn teardown(&self) {
        view::lock(&self.view).close();
        self.stop_polling();
    }

    /// 轮询状态与 RFP 状态保持一致
    fn sync_poller(&self) {
        let (wants_poll, closed) = {
            let state = view::lock(&self.view);
            (lifecycle::should_poll(state.status()), state.is_closed())
        };
        let mut slot = self.poller_slot();
        if !wants_poll || closed {
            slot.take();
            return;
        }
        if slot.as_ref().is_some_and(PollHandle::is_active) {
            return;
        }
        *slot = Some(poller::spawn(
            self.api.clone(),
            self.view.clone(),
            self.poll_interval,
        ));
    }

    fn stop_polling(&self) {
        self.poller_slot().take();
    }

    fn poller_slot(&self) -> std::sync::MutexGuard<'_, Option<PollHandle>> {
        self.poller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 同一时间只允许一个动作
    fn begin_action(&self) -> Result<ActionGuard<'_>> {
        if self.is_closed() {
            return Err(ClientError::Closed);
        }
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(ClientError::Validation(
                "Another action is already in progress".into(),
            ));
        }
        Ok(ActionGuard { busy: &self.busy })
    }
}

impl Drop for RfpController {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for RfpController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = view::lock(&self.view);
        f.debug_struct("RfpController")
            .field("rfp_id", &state.rfp_id())
            .field("status", &state.status())
            .field("responses", &state.responses().len())
            .field("closed", &state.is_closed())
            .finish()
    }
}

struct ActionGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for ActionGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
