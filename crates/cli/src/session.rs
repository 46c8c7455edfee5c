//! Line-oriented dashboard session
//!
//! Each line of input is one user intent (toggle, confirm, cancel, tier
//! change, ...). The session owns the only `EntitlementState`; it is created
//! on the configured tier and dropped when input ends.

use serde::Serialize;
use shepherd_core::{
    Committed, Decision, EntitlementError, EntitlementState, MonthlyCost, PendingAction, TierKind,
};
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  toggle <protection>   select or deselect a protection
  confirm               commit the pending add-on or swap
  cancel                discard the pending add-on or swap
  tier <name>           switch plans (resets selection and swaps)
  status                show plan, selection and cost
  cost                  show the monthly bill
  new-period            start a new billing period (resets swap usage)
  help                  show this help
  quit                  end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Toggle(String),
    Confirm,
    Cancel,
    Tier(String),
    Status,
    Cost,
    NewPeriod,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let needs_arg = |what: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("'{}' needs a {}", verb, what))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "toggle" | "t" => needs_arg("protection name").map(SessionCommand::Toggle),
            "confirm" | "yes" | "y" => Ok(SessionCommand::Confirm),
            "cancel" | "no" | "n" => Ok(SessionCommand::Cancel),
            "tier" => needs_arg("tier name").map(SessionCommand::Tier),
            "status" | "s" => Ok(SessionCommand::Status),
            "cost" => Ok(SessionCommand::Cost),
            "new-period" => Ok(SessionCommand::NewPeriod),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            _ => Err(format!("unknown command '{}', try 'help'", verb)),
        }
    }
}

/// What handling one command produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Decision {
        decision: Decision,
        cost: MonthlyCost,
    },
    Committed {
        change: Committed,
        cost: MonthlyCost,
    },
    Cancelled {
        discarded: Option<PendingAction>,
    },
    TierChanged {
        tier: TierKind,
        cost: MonthlyCost,
    },
    Status {
        state: EntitlementState,
        cost: MonthlyCost,
    },
    Cost {
        cost: MonthlyCost,
    },
    PeriodReset,
    Help,
    Error {
        message: String,
    },
    Quit,
}

pub struct Session {
    state: EntitlementState,
}

impl Session {
    pub fn new(tier: TierKind) -> Self {
        tracing::debug!(%tier, "session started");
        Self {
            state: EntitlementState::new(tier),
        }
    }

    pub fn state(&self) -> &EntitlementState {
        &self.state
    }

    /// Parses and handles one input line. Blank lines and `#` comments yield `None`.
    pub fn handle_line(&mut self, line: &str) -> Option<SessionEvent> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        Some(match trimmed.parse::<SessionCommand>() {
            Ok(cmd) => self.handle(cmd),
            Err(message) => SessionEvent::Error { message },
        })
    }

    pub fn handle(&mut self, cmd: SessionCommand) -> SessionEvent {
        match cmd {
            SessionCommand::Toggle(name) => {
                let decision = self.state.toggle_by_name(&name);
                tracing::debug!(?decision, "toggle {}", name);
                SessionEvent::Decision {
                    decision,
                    cost: self.state.cost(),
                }
            }
            SessionCommand::Confirm => match self.state.confirm() {
                Ok(change) => SessionEvent::Committed {
                    change,
                    cost: self.state.cost(),
                },
                Err(e) => error_event(e),
            },
            SessionCommand::Cancel => SessionEvent::Cancelled {
                discarded: self.state.cancel(),
            },
            SessionCommand::Tier(name) => match name.parse::<TierKind>() {
                Ok(tier) => {
                    self.state.change_tier(tier);
                    SessionEvent::TierChanged {
                        tier,
                        cost: self.state.cost(),
                    }
                }
                Err(e) => error_event(e),
            },
            SessionCommand::Status => SessionEvent::Status {
                state: self.state.clone(),
                cost: self.state.cost(),
            },
            SessionCommand::Cost => SessionEvent::Cost {
                cost: self.state.cost(),
            },
            SessionCommand::NewPeriod => {
                self.state.reset_period();
                SessionEvent::PeriodReset
            }
            SessionCommand::Help => SessionEvent::Help,
            SessionCommand::Quit => SessionEvent::Quit,
        }
    }
}

fn error_event(e: EntitlementError) -> SessionEvent {
    SessionEvent::Error {
        message: e.to_string(),
    }
}
