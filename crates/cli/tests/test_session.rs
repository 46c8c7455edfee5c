use serde_json::Value;
use shepherd_cli::commands::session::drive;
use shepherd_cli::session::{Session, SessionCommand, SessionEvent};
use shepherd_cli::OutputFormat;
use shepherd_core::{Committed, Decision, Money, PendingAction, Protection, RejectReason, TierKind};
use std::io::Cursor;

fn total(event: &SessionEvent) -> Money {
    match event {
        SessionEvent::Decision { cost, .. }
        | SessionEvent::Committed { cost, .. }
        | SessionEvent::TierChanged { cost, .. }
        | SessionEvent::Status { cost, .. }
        | SessionEvent::Cost { cost } => cost.total,
        other => panic!("event carries no cost: {:?}", other),
    }
}

#[test]
fn parse_commands_and_aliases() {
    assert_eq!(
        "toggle SSL Certificate".parse::<SessionCommand>(),
        Ok(SessionCommand::Toggle("SSL Certificate".to_string()))
    );
    assert_eq!(
        "t   ddos-protection ".parse::<SessionCommand>(),
        Ok(SessionCommand::Toggle("ddos-protection".to_string()))
    );
    assert_eq!("y".parse::<SessionCommand>(), Ok(SessionCommand::Confirm));
    assert_eq!("CONFIRM".parse::<SessionCommand>(), Ok(SessionCommand::Confirm));
    assert_eq!("no".parse::<SessionCommand>(), Ok(SessionCommand::Cancel));
    assert_eq!(
        "tier Guardian".parse::<SessionCommand>(),
        Ok(SessionCommand::Tier("Guardian".to_string()))
    );
    assert_eq!("new-period".parse::<SessionCommand>(), Ok(SessionCommand::NewPeriod));
    assert_eq!("?".parse::<SessionCommand>(), Ok(SessionCommand::Help));
    assert_eq!("exit".parse::<SessionCommand>(), Ok(SessionCommand::Quit));
}

#[test]
fn parse_rejects_missing_argument_and_unknown_verb() {
    let err = "toggle".parse::<SessionCommand>().unwrap_err();
    assert!(err.contains("protection name"), "{err}");

    let err = "frobnicate now".parse::<SessionCommand>().unwrap_err();
    assert!(err.contains("frobnicate"), "{err}");
}

#[test]
fn blank_lines_and_comments_are_skipped() {
    let mut session = Session::new(TierKind::PupSr);
    assert!(session.handle_line("").is_none());
    assert!(session.handle_line("   ").is_none());
    assert!(session.handle_line("# add two extras").is_none());
}

#[test]
fn pup_sr_walkthrough() {
    let mut session = Session::new(TierKind::PupSr);
    let status = session.handle(SessionCommand::Status);
    assert_eq!(total(&status), Money::dollars(99));

    let ev = session.handle_line("toggle SSL Certificate").unwrap();
    assert!(matches!(
        ev,
        SessionEvent::Decision {
            decision: Decision::RequiresAddOnConfirmation { .. },
            ..
        }
    ));
    // Nothing is billed until the add-on is confirmed.
    assert_eq!(total(&ev), Money::dollars(99));

    let ev = session.handle_line("confirm").unwrap();
    assert_eq!(total(&ev), Money::dollars(109));

    session.handle_line("toggle backup & recovery");
    let ev = session.handle_line("y").unwrap();
    assert_eq!(total(&ev), Money::dollars(119));
    assert_eq!(session.state().selected().len(), 8);

    let ev = session.handle_line("toggle Access Control").unwrap();
    assert!(matches!(
        ev,
        SessionEvent::Decision {
            decision: Decision::Reject(RejectReason::AtCapacity { .. }),
            ..
        }
    ));

    // First swap of the period is free.
    session.handle_line("toggle SSL Certificate");
    session.handle_line("toggle Access Control");
    let ev = session.handle_line("confirm").unwrap();
    assert!(matches!(
        ev,
        SessionEvent::Committed {
            change: Committed::Swapped { free: true, .. },
            ..
        }
    ));
    assert_eq!(total(&ev), Money::dollars(119));

    // The second one is billed at the swap price.
    session.handle_line("toggle Access Control");
    session.handle_line("toggle Audit Logging");
    let ev = session.handle_line("confirm").unwrap();
    assert_eq!(total(&ev), Money::dollars(124));
    assert_eq!(session.state().swaps_used(), 2);

    session.handle_line("new-period");
    let ev = session.handle_line("cost").unwrap();
    assert_eq!(total(&ev), Money::dollars(119));
}

#[test]
fn cancel_reports_discarded_action() {
    let mut session = Session::new(TierKind::PupSr);
    let before = session.state().clone();

    session.handle_line("toggle SSL Certificate");
    let ev = session.handle_line("cancel").unwrap();
    match ev {
        SessionEvent::Cancelled {
            discarded: Some(PendingAction::AddOn { protection, .. }),
        } => assert_eq!(protection, Protection::SslCertificate),
        other => panic!("unexpected event: {:?}", other),
    }
    assert_eq!(session.state(), &before);

    let ev = session.handle_line("cancel").unwrap();
    assert_eq!(ev, SessionEvent::Cancelled { discarded: None });
}

#[test]
fn confirm_without_pending_is_an_error_event() {
    let mut session = Session::new(TierKind::Guardian);
    let ev = session.handle_line("confirm").unwrap();
    assert!(matches!(ev, SessionEvent::Error { .. }));
}

#[test]
fn unknown_protection_and_tier_leave_state_alone() {
    let mut session = Session::new(TierKind::PupJr);
    let before = session.state().clone();

    let ev = session.handle_line("toggle Quantum Shield").unwrap();
    assert!(matches!(
        ev,
        SessionEvent::Decision {
            decision: Decision::Reject(RejectReason::UnknownProtection { .. }),
            ..
        }
    ));

    let ev = session.handle_line("tier Platinum").unwrap();
    match ev {
        SessionEvent::Error { message } => assert!(message.contains("Platinum"), "{message}"),
        other => panic!("unexpected event: {:?}", other),
    }
    assert_eq!(session.state(), &before);
}

#[test]
fn tier_change_resets_selection() {
    let mut session = Session::new(TierKind::PupSr);
    session.handle_line("toggle SSL Certificate");
    session.handle_line("confirm");

    let ev = session.handle_line("tier guardian").unwrap();
    assert!(matches!(
        ev,
        SessionEvent::TierChanged {
            tier: TierKind::Guardian,
            ..
        }
    ));
    assert_eq!(total(&ev), Money::dollars(199));
    assert_eq!(session.state().selected().len(), 9);
    assert_eq!(session.state().swaps_used(), 0);
    assert!(session.state().pending().is_none());
}

#[test]
fn drive_emits_one_json_event_per_command() {
    let input = "\
# Pup SR. with one extra
toggle SSL Certificate
confirm

cost
quit
status
";
    let mut out = Vec::new();
    drive(TierKind::PupSr, OutputFormat::Json, Cursor::new(input), &mut out, false).unwrap();

    let events: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let kinds: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    // Opening status, then one event per command up to quit.
    assert_eq!(kinds, ["status", "decision", "committed", "cost", "quit"]);

    assert_eq!(
        events[1]["decision"]["decision"],
        "requires_add_on_confirmation"
    );
    assert_eq!(events[3]["cost"]["total"].as_f64(), Some(109.0));
}

#[test]
fn drive_terminal_output_ends_at_eof() {
    colored::control::set_override(false);
    let mut out = Vec::new();
    drive(
        TierKind::Alpha,
        OutputFormat::Terminal,
        Cursor::new("status\n"),
        &mut out,
        false,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Alpha"));
    assert!(text.contains("Total Monthly Cost: $299/mo"), "{text}");
}
