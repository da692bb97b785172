//! RFP 生命周期: DRAFT -> SENT -> EVALUATED
//!
//! 纯函数, 不做 I/O. 控制器在发请求前调用这里的检查, 检查不过则不发请求.

use crate::error::{ClientError, Result};
use crate::models::RfpStatus;
use indexmap::IndexSet;
use std::fmt;

/// 会改变状态的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfpAction {
    Send,
    Evaluate,
}

impl fmt::Display for RfpAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Send => "send",
            Self::Evaluate => "evaluate",
        })
    }
}

/// 转移表
pub fn next_status(status: RfpStatus, action: RfpAction) -> Result<RfpStatus> {
    match (status, action) {
        (RfpStatus::Draft, RfpAction::Send) => Ok(RfpStatus::Sent),
        (RfpStatus::Sent, RfpAction::Evaluate) => Ok(RfpStatus::Evaluated),
        _ => Err(ClientError::InvalidTransition { status, action }),
    }
}

/// 发送前检查, 返回去重后的供应商ID (保持选择顺序)
pub fn check_send(status: RfpStatus, vendor_ids: &[i64]) -> Result<Vec<i64>> {
    next_status(status, RfpAction::Send)?;
    let unique: IndexSet<i64> = vendor_ids.iter().copied().collect();
    if unique.is_empty() {
        return Err(ClientError::Validation(
            "Please select at least one vendor".into(),
        ));
    }
    Ok(unique.into_iter().collect())
}

/// 评估前检查: 本地至少已加载一条回复
pub fn check_evaluate(status: RfpStatus, loaded_responses: usize) -> Result<RfpStatus> {
    let next = next_status(status, RfpAction::Evaluate)?;
    if loaded_responses == 0 {
        return Err(ClientError::Validation("No responses to evaluate".into()));
    }
    Ok(next)
}

/// 只有 SENT 状态需要轮询
pub fn should_poll(status: RfpStatus) -> bool {
    status == RfpStatus::Sent
}

/// 服务端回报的状态只允许前进
pub fn is_forward(from: RfpStatus, to: RfpStatus) -> bool {
    rank(to) >= rank(from)
}

fn rank(status: RfpStatus) -> u8 {
    match status {
        RfpStatus::Draft => 0,
        RfpStatus::Sent => 1,
        RfpStatus::Evaluated => 2,
    }
}
