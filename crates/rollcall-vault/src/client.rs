//! Lock handling and credential lookup against the rbw agent

use tracing::{debug, info, warn};

use crate::error::VaultError;
use crate::runner::CommandRunner;

/// Observed state of the rbw agent's store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// The store is locked; credentials cannot be read yet.
    Locked,
    /// The store is unlocked.
    Unlocked,
    /// The status probe itself failed.
    Unknown,
}

/// Substitute the vault ID into a credential name template.
#[must_use]
pub fn resolve_credential(template: &str, vault_id: &str) -> String {
    template.replace("{VAULT_ID}", vault_id)
}

/// Client for the rbw Bitwarden CLI.
pub struct RbwClient<R> {
    runner: R,
    try_unlock: bool,
}

impl<R: CommandRunner> RbwClient<R> {
    /// Create a client over the given runner.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            try_unlock: true,
        }
    }

    /// Control whether a locked store triggers an unlock attempt.
    #[must_use]
    pub fn with_try_unlock(mut self, try_unlock: bool) -> Self {
        self.try_unlock = try_unlock;
        self
    }

    /// Probe the agent's lock state via `rbw unlocked`.
    pub async fn lock_state(&self) -> LockState {
        match self.runner.run("rbw", &["unlocked"]).await {
            Ok(result) if result.success() => LockState::Unlocked,
            Ok(_) => LockState::Locked,
            Err(e) => {
                warn!(error = %e, "rbw status probe failed");
                LockState::Unknown
            }
        }
    }

    /// Attempt the locked-to-unlocked transition.
    async fn unlock(&self) -> Result<(), VaultError> {
        if !self.try_unlock {
            return Err(VaultError::Locked);
        }

        info!("store is locked, attempting unlock");
        let result = self.runner.run("rbw", &["unlock"]).await?;
        if result.success() {
            Ok(())
        } else {
            Err(VaultError::UnlockFailed(result.stderr))
        }
    }

    /// Resolve one credential, unlocking first when the store is locked.
    ///
    /// # Errors
    /// Returns an error if the store stays locked or the lookup fails.
    pub async fn get(&self, credential: &str, folder: Option<&str>) -> Result<String, VaultError> {
        match self.lock_state().await {
            LockState::Unlocked => {}
            LockState::Locked | LockState::Unknown => self.unlock().await?,
        }

        let mut args = vec!["get"];
        if let Some(folder) = folder {
            args.push("--folder");
            args.push(folder);
        }
        args.push(credential);

        let result = self.runner.run("rbw", &args).await?;
        if !result.success() {
            return Err(VaultError::LookupFailed {
                credential: credential.to_string(),
                stderr: result.stderr,
            });
        }

        debug!(credential, "credential resolved");
        Ok(result.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::runner::CommandResult;

    /// Scripted rbw: tracks lock state, flips it on `unlock` when allowed.
    struct MockRbw {
        unlocked: Mutex<bool>,
        unlock_succeeds: bool,
        secret: &'static str,
    }

    impl MockRbw {
        fn new(unlocked: bool, unlock_succeeds: bool) -> Self {
            Self {
                unlocked: Mutex::new(unlocked),
                unlock_succeeds,
                secret: "hunter2\n",
            }
        }
    }

    fn ok(status: i32, stdout: &str, stderr: &str) -> CommandResult {
        CommandResult {
            status,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[async_trait]
    impl CommandRunner for MockRbw {
        async fn run(&self, _program: &str, args: &[&str]) -> Result<CommandResult, VaultError> {
            match args[0] {
                "unlocked" => {
                    let unlocked = *self.unlocked.lock().unwrap();
                    Ok(ok(i32::from(!unlocked), "", ""))
                }
                "unlock" => {
                    if self.unlock_succeeds {
                        *self.unlocked.lock().unwrap() = true;
                        Ok(ok(0, "", ""))
                    } else {
                        Ok(ok(1, "", "wrong password"))
                    }
                }
                "get" => {
                    if *self.unlocked.lock().unwrap() {
                        Ok(ok(0, self.secret, ""))
                    } else {
                        Ok(ok(1, "", "agent is locked"))
                    }
                }
                other => panic!("unexpected rbw subcommand: {other}"),
            }
        }
    }

    #[tokio::test]
    async fn test_get_from_unlocked_store() {
        let client = RbwClient::new(MockRbw::new(true, false));
        let secret = client.get("ansible-vault-prod", None).await.unwrap();
        assert_eq!(secret, "hunter2\n");
    }

    #[tokio::test]
    async fn test_locked_store_is_unlocked_first() {
        let client = RbwClient::new(MockRbw::new(false, true));
        assert_eq!(client.lock_state().await, LockState::Locked);

        let secret = client.get("ansible-vault-prod", None).await.unwrap();
        assert_eq!(secret, "hunter2\n");
    }

    #[tokio::test]
    async fn test_locked_store_with_unlock_disabled() {
        let client = RbwClient::new(MockRbw::new(false, true)).with_try_unlock(false);
        let err = client.get("ansible-vault-prod", None).await.unwrap_err();
        assert!(matches!(err, VaultError::Locked));
    }

    #[tokio::test]
    async fn test_failed_unlock_surfaces() {
        let client = RbwClient::new(MockRbw::new(false, false));
        let err = client.get("ansible-vault-prod", None).await.unwrap_err();
        assert!(matches!(err, VaultError::UnlockFailed(_)));
    }

    #[tokio::test]
    async fn test_folder_scopes_the_lookup() {
        struct CaptureArgs;

        #[async_trait]
        impl CommandRunner for CaptureArgs {
            async fn run(&self, _program: &str, args: &[&str]) -> Result<CommandResult, VaultError> {
                if args[0] == "get" {
                    assert_eq!(args, ["get", "--folder", "infra", "ansible-vault-prod"]);
                }
                Ok(ok(0, "s", ""))
            }
        }

        let client = RbwClient::new(CaptureArgs);
        client
            .get("ansible-vault-prod", Some("infra"))
            .await
            .unwrap();
    }

    #[test]
    fn test_resolve_credential_substitution() {
        assert_eq!(
            resolve_credential("ansible-vault-{VAULT_ID}", "prod"),
            "ansible-vault-prod"
        );
        assert_eq!(resolve_credential("static-name", "prod"), "static-name");
    }
}
