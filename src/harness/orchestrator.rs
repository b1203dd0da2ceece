//! Sequential runner with automatic session bracketing.

use tracing::{info, warn};

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::harness::operation::{Fixtures, OperationKind};
use crate::harness::report::{RunReport, StepRecord, Trigger};
use crate::session::{Credentials, SessionClient, SessionState};

/// Runs named operations in order against one borrowed [`SessionClient`].
///
/// Operations that need a session get an implicit login first; a run that
/// ends with the session open gets an implicit logout, and so does a
/// requested login while a session is still open. A failing step is
/// recorded and the run moves on, except that after a failed login the
/// remaining session-requiring steps are refused until a login succeeds.
pub struct TestOrchestrator<'a> {
    client: &'a mut SessionClient,
    credentials: Credentials,
    fixtures: Fixtures,
}

impl<'a> TestOrchestrator<'a> {
    pub fn new(client: &'a mut SessionClient, config: &HarnessConfig) -> Self {
        Self::with_fixtures(client, config.ssh.clone(), Fixtures::from_config(config))
    }

    pub fn with_fixtures(
        client: &'a mut SessionClient,
        credentials: Credentials,
        fixtures: Fixtures,
    ) -> Self {
        Self {
            client,
            credentials,
            fixtures,
        }
    }

    pub fn client(&self) -> &SessionClient {
        &*self.client
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    /// Run `names` in order.
    pub async fn run<S: AsRef<str>>(&mut self, names: &[S]) -> RunReport {
        let mut report = RunReport::default();
        let mut state = if self.client.is_authenticated() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        };
        let mut login_failed = false;

        for name in names.iter().map(AsRef::as_ref) {
            let Some(kind) = OperationKind::from_name(name) else {
                warn!(operation = name, "unknown operation");
                report.push(StepRecord::new(
                    name,
                    Trigger::Requested,
                    Err(HarnessError::UnknownOperation(name.to_string())),
                ));
                continue;
            };

            if state.needs_login(kind.requirement()) {
                let opened = !login_failed
                    && self
                        .step(&mut report, &mut state, OperationKind::Login, Trigger::ImplicitLogin)
                        .await;
                if !opened {
                    login_failed = true;
                    warn!(operation = name, "skipped, no session");
                    report.push(StepRecord::new(
                        name,
                        Trigger::Requested,
                        Err(HarnessError::SessionUnavailable(name.to_string())),
                    ));
                    continue;
                }
            }

            // A second login would orphan the open remote session.
            if kind == OperationKind::Login && state.is_logged_in() {
                self.step(
                    &mut report,
                    &mut state,
                    OperationKind::Logout,
                    Trigger::ImplicitLogout,
                )
                .await;
            }

            let succeeded = self
                .step(&mut report, &mut state, kind, Trigger::Requested)
                .await;
            if kind == OperationKind::Login {
                login_failed = !succeeded;
            }
        }

        if state.is_logged_in() {
            self.step(
                &mut report,
                &mut state,
                OperationKind::Logout,
                Trigger::ImplicitLogout,
            )
            .await;
        }

        info!(summary = %report.summary(), "run finished");
        report
    }

    async fn step(
        &mut self,
        report: &mut RunReport,
        state: &mut SessionState,
        kind: OperationKind,
        trigger: Trigger,
    ) -> bool {
        info!(operation = kind.name(), %trigger, "running");
        let result = kind
            .invoke(&mut *self.client, &self.fixtures, &self.credentials)
            .await;
        let succeeded = result.is_ok();

        *state = state.apply(kind.effect(), succeeded);
        debug_assert_eq!(state.is_logged_in(), self.client.is_authenticated());

        match &result {
            Ok(payload) => info!(operation = kind.name(), %payload, "succeeded"),
            Err(e) => warn!(operation = kind.name(), kind = ?e.kind(), "failed: {}", e),
        }
        report.push(StepRecord::new(kind.name(), trigger, result));
        succeeded
    }
}
