use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// The signed-in user as reported by the auth session.
///
/// 当前登录用户。缺席（未登录）由 `Option::None` 表示。
///
/// Anonymous sessions are disposable: signing out of one is immediately
/// followed by a fresh anonymous sign-in, so the application never renders
/// an unauthenticated state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub is_anonymous: bool,
}

impl Identity {
    pub fn anonymous(user_id: UserId) -> Self {
        Self {
            user_id,
            is_anonymous: true,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
