use log::info;

use crate::user::model::AgeGroup;

use super::Error;
use super::model::{Credentials, Session};

const NICKNAME_MIN: usize = 4;
const NICKNAME_MAX: usize = 20;

#[derive(Clone)]
pub struct AuthService {
    api: super::Api,
}

impl AuthService {
    pub fn new(api: super::Api) -> Self {
        Self { api }
    }

    /// Validates the credentials before any network call, then joins the
    /// room. The trimmed nickname is what gets submitted.
    pub async fn login(&self, nickname: &str, age_group: &str) -> super::Result<Session> {
        let nickname = nickname.trim();
        let length = nickname.chars().count();
        if length < NICKNAME_MIN || length > NICKNAME_MAX {
            return Err(Error::InvalidNickname);
        }
        let age_group: AgeGroup = age_group.parse().map_err(Error::InvalidAgeGroup)?;

        let session = self
            .api
            .login(&Credentials {
                nickname: nickname.to_string(),
                age_group,
            })
            .await?;

        info!("joined as {}", session.user.nickname);
        Ok(session)
    }
}
