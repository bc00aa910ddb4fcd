use serde::{Deserialize, Serialize};

use crate::user::model::{AgeGroup, User};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub nickname: String,
    pub age_group: AgeGroup,
}

/// Login payload: the server-shaped user plus the bearer token for every
/// subsequent call.
#[derive(Clone, Debug, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}
