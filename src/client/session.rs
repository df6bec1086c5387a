use std::sync::{Arc, RwLock};

/// Admin session shared by every authenticated call.
///
/// The token is set at login and cleared at logout. Clones share the
/// same token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&self, token: impl Into<String>) {
        let mut guard = match self.token.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(token.into());
    }

    pub fn logout(&self) {
        let mut guard = match self.token.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = None;
    }

    pub fn bearer(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::Session;

    #[test]
    fn clones_share_login_state() {
        let session = Session::new();
        let shared = session.clone();
        assert!(!shared.is_authenticated());

        session.login("secret");
        assert_eq!(shared.bearer().as_deref(), Some("secret"));

        shared.logout();
        assert!(!session.is_authenticated());
    }
}
