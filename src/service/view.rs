//! 单个 RFP 视图持有的本地副本
//!
//! 每次拉取回复都先领取一个递增序号; 只有序号比已应用的更新时才覆盖本地列表.
//! 视图关闭后所有结果都被丢弃.

use super::lifecycle;
use crate::models::{Evaluation, Rfp, RfpStatus, VendorResponse};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

pub type SharedView = Arc<Mutex<ViewState>>;

#[derive(Debug)]
pub struct ViewState {
    rfp: Rfp,
    responses: Vec<VendorResponse>,
    evaluation: Option<Evaluation>,
    issued_seq: u64,
    applied_seq: u64,
    closed: bool,
    /// 每次本地状态变化 +1
    revision: u64,
}

impl ViewState {
    pub fn new(rfp: Rfp) -> Self {
        Self {
            rfp,
            responses: Vec::new(),
            evaluation: None,
            issued_seq: 0,
            applied_seq: 0,
            closed: false,
            revision: 0,
        }
    }

    pub fn shared(rfp: Rfp) -> SharedView {
        Arc::new(Mutex::new(Self::new(rfp)))
    }

    pub fn rfp(&self) -> &Rfp {
        &self.rfp
    }

    pub fn rfp_id(&self) -> i64 {
        self.rfp.rfp_id
    }

    pub fn status(&self) -> RfpStatus {
        self.rfp.rfp_status
    }

    pub fn responses(&self) -> &[VendorResponse] {
        &self.responses
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// 领取拉取序号, 视图已关闭时返回 None
    pub fn begin_fetch(&mut self) -> Option<u64> {
        if self.closed {
            return None;
        }
        self.issued_seq += 1;
        Some(self.issued_seq)
    }

    /// 整体替换回复列表; 过期或关闭后的结果被丢弃, 返回是否应用
    pub fn apply_responses(&mut self, seq: u64, responses: Vec<VendorResponse>) -> bool {
        if self.closed {
            debug!("RFP {} view closed, dropping fetch #{}", self.rfp.rfp_id, seq);
            return false;
        }
        if seq <= self.applied_seq {
            debug!(
                "RFP {} dropping stale fetch #{} (already applied #{})",
                self.rfp.rfp_id, seq, self.applied_seq
            );
            return false;
        }
        self.applied_seq = seq;
        self.responses = responses;
        self.revision += 1;
        true
    }

    /// 状态转移成功后更新本地状态
    pub fn set_status(&mut self, status: RfpStatus) {
        if self.closed || self.rfp.rfp_status == status {
            return;
        }
        self.rfp.rfp_status = status;
        self.revision += 1;
    }

    /// 新的评估结果替换旧的
    pub fn set_evaluation(&mut self, evaluation: Evaluation) {
        if self.closed {
            return;
        }
        self.evaluation = Some(evaluation);
        self.revision += 1;
    }

    /// 用服务端的 RFP 校准本地副本, 状态不回退
    pub fn reconcile(&mut self, mut server: Rfp) {
        if self.closed {
            return;
        }
        if server.rfp_id != self.rfp.rfp_id {
            warn!(
                "Ignoring RFP {} while viewing RFP {}",
                server.rfp_id, self.rfp.rfp_id
            );
            return;
        }
        if !lifecycle::is_forward(self.rfp.rfp_status, server.rfp_status) {
            warn!(
                "RFP {} server reports {} after local {}, keeping local status",
                server.rfp_id, server.rfp_status, self.rfp.rfp_status
            );
            server.rfp_status = self.rfp.rfp_status;
        }
        if server != self.rfp {
            self.rfp = server;
            self.revision += 1;
        }
    }

    pub fn close(&mut self) {
        self.closed = true;
    }
}

/// 锁中毒时仍取回内部状态, 持锁期间不会 panic
pub fn lock(view: &SharedView) -> MutexGuard<'_, ViewState> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}
