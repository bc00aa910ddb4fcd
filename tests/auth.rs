#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use chrono::Utc;

    use chatconnect_client::auth::api::AuthApi;
    use chatconnect_client::auth::model::{Credentials, Session};
    use chatconnect_client::auth::service::AuthService;
    use chatconnect_client::auth::{self, Error};
    use chatconnect_client::user::Name;
    use chatconnect_client::user::model::{AgeGroup, Role, Status, User};

    struct FakeAuthApi {
        requests: Mutex<Vec<Credentials>>,
    }

    impl FakeAuthApi {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl AuthApi for FakeAuthApi {
        async fn login(&self, credentials: &Credentials) -> Result<Session, auth::Error> {
            self.requests.lock().unwrap().push(credentials.clone());

            Ok(Session {
                user: User {
                    nickname: Name(credentials.nickname.clone()),
                    age_group: credentials.age_group,
                    joined_at: Utc::now(),
                    last_seen: Utc::now(),
                    roles: vec![Role::Member],
                    previous_nicknames: Vec::new(),
                    chat_color: "#10B981".into(),
                    avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=test".into(),
                    status: Status::Online,
                },
                token: "token-1".into(),
            })
        }
    }

    #[tokio::test]
    async fn short_nicknames_are_rejected_before_any_call() {
        let api = FakeAuthApi::new();
        let service = AuthService::new(api.clone());

        match service.login("ab", "adults").await {
            Err(Error::InvalidNickname) => {}
            other => panic!("expected InvalidNickname, got {other:?}"),
        }
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn overlong_nicknames_are_rejected_before_any_call() {
        let api = FakeAuthApi::new();
        let service = AuthService::new(api.clone());

        let nickname = "x".repeat(21);
        assert!(matches!(
            service.login(&nickname, "adults").await,
            Err(Error::InvalidNickname)
        ));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn unknown_age_groups_are_rejected_before_any_call() {
        let api = FakeAuthApi::new();
        let service = AuthService::new(api.clone());

        match service.login("alice", "elders").await {
            Err(Error::InvalidAgeGroup(group)) => assert_eq!(group, "elders"),
            other => panic!("expected InvalidAgeGroup, got {other:?}"),
        }
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn valid_credentials_are_trimmed_and_submitted() {
        let api = FakeAuthApi::new();
        let service = AuthService::new(api.clone());

        let session = service.login("  alice  ", "young-adults").await.unwrap();
        assert_eq!(session.user.nickname, Name::from("alice"));
        assert_eq!(session.token, "token-1");

        let requests = api.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].nickname, "alice");
        assert_eq!(requests[0].age_group, AgeGroup::YoungAdults);
    }
}
