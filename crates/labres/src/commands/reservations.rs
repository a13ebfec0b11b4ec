//! Reservation command handlers: active, past, create.

use std::io::IsTerminal;

use dialoguer::{Input, Select};
use strum::IntoEnumIterator;
use tabled::Tabled;

use labres_core::time::{self, BOOKING_HOURS};
use labres_core::{FieldName, Laboratory, Reservation, Tab};

use crate::cli::{CreateArgs, GlobalOpts, OutputFormat, PastArgs};
use crate::error::CliError;
use crate::output;

use super::{Session, prompt_err};

const NO_ACTIVE: &str = "No active reservations found.";
const NO_PAST: &str = "No reservations found for the selected date range.";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReservationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Student ID")]
    student_id: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Laboratory")]
    laboratory: String,
    #[tabled(rename = "Time")]
    time: String,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.to_string(),
            name: r.name.clone(),
            student_id: r.student_id.clone(),
            email: r.email.clone(),
            laboratory: r.laboratory.to_string(),
            time: time::to_display_string(&r.reservation_time),
        }
    }
}

fn detail(r: &Reservation) -> String {
    [
        format!("ID:          {}", r.id),
        format!("Name:        {}", r.name),
        format!("Student ID:  {}", r.student_id),
        format!("Email:       {}", r.email),
        format!("Laboratory:  {}", r.laboratory),
        format!("Time:        {}", time::to_display_string(&r.reservation_time)),
    ]
    .join("\n")
}

fn print_list(session: &Session, global: &GlobalOpts, empty: &str) -> Result<(), CliError> {
    let reservations = &session.controller.state().reservations;

    let human = matches!(global.output, OutputFormat::Table | OutputFormat::Plain);

    if reservations.is_empty() && human {
        output::print_note(global, empty);
        return Ok(());
    }

    let out = output::render_list(
        &global.output,
        reservations,
        |r| ReservationRow::from(r),
        |r| r.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn active(session: &mut Session, global: &GlobalOpts) -> Result<(), CliError> {
    let request = session.controller.select_tab(Tab::Current);
    session
        .run(request, global, "Loading active reservations")
        .await?;
    print_list(session, global, NO_ACTIVE)
}

pub async fn past(
    session: &mut Session,
    args: PastArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(start) = args.start {
        session.controller.edit_start_date(start);
    }
    if let Some(end) = args.end {
        session.controller.edit_end_date(end);
    }

    let request = session.controller.select_tab(Tab::Past);
    session
        .run(request, global, "Loading past reservations")
        .await?;
    print_list(session, global, NO_PAST)
}

pub async fn create(
    session: &mut Session,
    args: CreateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let interactive =
        !args.no_input && std::io::stdin().is_terminal() && std::io::stderr().is_terminal();

    // No fetch on the New tab; this only clears any stale error.
    let _ = session.controller.select_tab(Tab::New);

    let fields = [
        (FieldName::Email, args.email),
        (FieldName::Name, args.name),
        (FieldName::StudentId, args.student_id),
        (FieldName::Laboratory, args.lab),
        (FieldName::ReservationTime, args.time),
    ];
    for (field, value) in fields {
        let value = match value {
            Some(value) => value,
            None if interactive => prompt(field)?,
            None => continue,
        };
        session.controller.edit_field(field, value);
    }

    let request = session.controller.submit_reservation();
    session.settle(request, global, "Creating reservation").await;

    let Some(created) = session.controller.last_created().cloned() else {
        return session.check();
    };

    if let Some(message) = session.controller.take_notification() {
        output::print_success(global, &message);
    }
    if let Some(ref refresh_error) = session.controller.state().error {
        tracing::warn!(error = %refresh_error, "refresh after create failed");
    }

    let out = output::render_single(&global.output, &created, detail, |r| r.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Prompts ─────────────────────────────────────────────────────────

fn prompt(field: FieldName) -> Result<String, CliError> {
    match field {
        FieldName::Laboratory => {
            let labs: Vec<String> = Laboratory::iter().map(|l| l.to_string()).collect();
            let selection = Select::new()
                .with_prompt("Laboratory")
                .items(&labs)
                .default(0)
                .interact()
                .map_err(prompt_err)?;
            Ok(labs.get(selection).cloned().unwrap_or_default())
        }
        FieldName::ReservationTime => Input::<String>::new()
            .with_prompt(format!(
                "Reservation time (YYYY-MM-DD HH:00, {:02}:00-{:02}:00)",
                BOOKING_HOURS.start(),
                BOOKING_HOURS.end()
            ))
            .validate_with(|input: &String| -> Result<(), String> {
                let ts = time::to_canonical(input).map_err(|e| e.to_string())?;
                if time::is_booking_slot(&ts) {
                    Ok(())
                } else {
                    Err("pick a time on the hour between 08:00 and 22:00".into())
                }
            })
            .interact_text()
            .map_err(prompt_err),
        FieldName::Email => text_prompt("Email"),
        FieldName::Name => text_prompt("Name"),
        FieldName::StudentId => text_prompt("Student ID"),
    }
}

fn text_prompt(label: &str) -> Result<String, CliError> {
    Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .map_err(prompt_err)
}
