// ABOUTME: Output formatting helpers for vumpit-cli
// ABOUTME: Renders wizard events, run results, account tables and coach summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use vumpit::directory::CoachSummary;
use vumpit::models::User;
use vumpit::runtime::{RunOutcome, RunnerMessage};
use vumpit::wizard::{WizardEvent, WizardState};
use vumpit_intelligence::get_recommendation;

fn step_title(state: WizardState) -> &'static str {
    match state {
        WizardState::Idle => "Measurement closed",
        WizardState::Weighing => "Step 1: stand still on the scale",
        WizardState::WearableCheck => "Step 2: put on the wearable sensor",
        WizardState::MeasuringHeight => "Step 3: stand straight for height",
        WizardState::BmiComputed => "BMI result",
        WizardState::StandingReach => "Step 4: reach up as high as you can, feet flat",
        WizardState::JumpInstruction => "Step 5: vertical jump instructions",
        WizardState::JumpCountdown => "Get ready to jump",
        WizardState::JumpMeasuring => "JUMP!",
        WizardState::JumpComputed => "Jump result",
        WizardState::Committed => "Saved",
    }
}

/// Print one runner message
pub fn runner_message(message: &RunnerMessage) {
    match message {
        RunnerMessage::Event(event) => event_line(event),
        RunnerMessage::Rejected { action, error } => println!("  ! {action}: {error}"),
    }
}

fn event_line(event: &WizardEvent) {
    match event {
        WizardEvent::StepEntered { state } => println!("\n== {} ==", step_title(*state)),
        WizardEvent::ReadingReady { channel, value } => {
            println!("  {channel}: {value:.1}  [continue / restart]");
        }
        WizardEvent::BmiComputed { bmi, rating } => {
            println!("  BMI {bmi:.1} ({rating})  [jump / skip]");
        }
        WizardEvent::VideoRequested => println!("  (playing the jump demonstration video)"),
        WizardEvent::CountdownTick { remaining } => {
            if *remaining > 0 {
                println!("  {remaining}...");
            }
        }
        WizardEvent::JumpComputed { jump, trial } => {
            println!(
                "  Trial {trial}: jump reach {:.0} cm, vertical jump {:.0} cm ({})  [again / finish]",
                jump.jump_reach, jump.vertical_jump, jump.jump_rating
            );
        }
        WizardEvent::JumpNotDetected => println!("  No jump detected, try again"),
        WizardEvent::DeviceDisconnected { state } => {
            println!("  Sensor disconnected during {state}; reconnect it, then resume");
        }
        WizardEvent::DeviceReconnected => println!("  Sensor reconnected"),
        WizardEvent::CancelRequested => println!("  Cancel this measurement? [yes / no]"),
        WizardEvent::CancelDismissed => println!("  Continuing"),
        WizardEvent::Cancelled => println!("  Measurement cancelled, nothing was saved"),
        WizardEvent::Committed { snapshot } => {
            println!(
                "  Saved {}: {:.1} kg, {:.0} cm, BMI {:.1}",
                snapshot.date,
                snapshot.weight,
                snapshot.height,
                snapshot.bmi_display()
            );
        }
    }
}

/// Keys accepted in interactive mode
pub fn key_help() {
    println!(
        "Keys: [c]ontinue [r]estart [j]ump [s]kip-jump [v]ideo [n]ext \
         [a]gain [f]inish resume [x]cancel [y]es [no]"
    );
}

/// Summary after the run ends
pub fn run_outcome(outcome: &RunOutcome) {
    println!("{}", "=".repeat(60));
    let Some(snapshot) = &outcome.snapshot else {
        println!("Run ended in {} without saving", outcome.final_state);
        return;
    };
    println!("Measurement saved for {}", snapshot.date);
    println!("   Weight: {:.1} kg", snapshot.weight);
    println!("   Height: {:.0} cm", snapshot.height);
    println!("   BMI: {:.1} ({})", snapshot.bmi_display(), snapshot.bmi_rating);
    if let Some(jump) = snapshot.jump {
        println!("   Vertical jump: {:.0} cm ({})", jump.vertical_jump, jump.jump_rating);
        let bundle = get_recommendation(Some(jump.jump_rating));
        println!("   Training focus: {}", bundle.training_focus);
    }
    println!("   Took {:.1} s", outcome.elapsed.as_secs_f64());
}

/// Accounts as a fixed-width table
pub fn user_table(users: &[&User]) {
    if users.is_empty() {
        println!("No users found");
        return;
    }
    println!("ID         NAME               ROLE    SPORT        COLLEGE");
    for user in users {
        println!(
            "{:<10} {:<18} {:<7} {:<12} {}",
            user.id,
            user.name,
            user.role.as_str(),
            user.sport,
            user.college
        );
    }
}

/// Coach dashboard counts
pub fn coach_summary(summary: &CoachSummary) {
    println!("Coach {} ({})", summary.coach_id, summary.sport);
    println!("   Classes: {}", summary.class_count);
    println!("   Athletes: {}", summary.athlete_count);
    println!("   Students: {}", summary.student_count);
}
