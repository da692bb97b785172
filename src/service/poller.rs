//! 回复轮询: RFP 处于 SENT 时按固定间隔拉取全部回复并整体替换本地列表.
//!
//! 每个视图最多一个轮询任务. 上一次拉取未返回前不会触发下一次;
//! 单次失败只记日志, 循环继续. 句柄被取消或丢弃时任务立即中止.

use super::lifecycle;
use super::view::{self, SharedView};
use crate::api::RfpApi;
use crate::config::DEFAULT_POLL_INTERVAL;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// 轮询任务句柄, 丢弃即停止
#[derive(Debug)]
pub struct PollHandle {
    rfp_id: i64,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn rfp_id(&self) -> i64 {
        self.rfp_id
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn cancel(self) {
        // Drop 负责 abort
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!("Stopping response poller for RFP {}", self.rfp_id);
        }
        self.task.abort();
    }
}

/// 启动轮询. 第一次拉取在一个间隔之后; 挂载时的拉取由调用方负责.
/// 间隔为 0 时回退到默认值.
pub fn spawn(api: Arc<dyn RfpApi>, view: SharedView, interval: Duration) -> PollHandle {
    let rfp_id = view::lock(&view).rfp_id();
    let interval = if interval.is_zero() {
        warn!("RFP {} poll interval is zero, using {:?}", rfp_id, DEFAULT_POLL_INTERVAL);
        DEFAULT_POLL_INTERVAL
    } else {
        interval
    };
    info!("Polling responses for RFP {} every {:?}", rfp_id, interval);
    let task = tokio::spawn(run(api, view, interval));
    PollHandle { rfp_id, task }
}

async fn run(api: Arc<dyn RfpApi>, view: SharedView, interval: Duration) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tick: u64 = 0;

    loop {
        ticker.tick().await;
        tick += 1;

        let (rfp_id, seq) = {
            let mut state = view::lock(&view);
            if state.is_closed() || !lifecycle::should_poll(state.status()) {
                debug!(
                    "RFP {} no longer polling (status {}, closed {})",
                    state.rfp_id(),
                    state.status(),
                    state.is_closed()
                );
                break;
            }
            match state.begin_fetch() {
                Some(seq) => (state.rfp_id(), seq),
                None => break,
            }
        };

        match api.list_responses(rfp_id).await {
            Ok(responses) => {
                let count = responses.len();
                if view::lock(&view).apply_responses(seq, responses) {
                    debug!("RFP {} poll #{}: {} responses", rfp_id, tick, count);
                }
            }
            Err(e) => {
                warn!("RFP {} poll #{} failed: {}", rfp_id, tick, e);
            }
        }
    }
}
