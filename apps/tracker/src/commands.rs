//! Command dispatch and terminal rendering.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::cli::{
    ApplicationFields, ApplicationsCommand, Command, ContactFields, EmailFields, EmailsCommand,
    NetworkingCommand, TargetsCommand,
};
use crate::controllers::{LocalList, ResumeFile};
use crate::models::application::{self, parse_form_date, parse_hourly_rate};
use crate::models::email::{self, parse_direction};
use crate::models::contact;
use crate::models::{
    ApplicationDraft, ContactDraft, EmailDraft, Entity, Record, RecordId, TargetCompanyDraft,
};
use crate::notify::{Notification, NotificationKind, NotificationRelay};
use crate::shell::{AuthMode, ShellView, Tab};
use crate::state::AppContext;
use crate::views::{pipeline, PriorityClass, StatusClass, APPLICATION_PIPELINE};

pub async fn run(ctx: &mut AppContext, command: Command) -> Result<()> {
    let view = ctx.shell.start().await;
    debug!("Session settled: {view:?}");

    let outcome = dispatch(ctx, command, view).await;
    print_notification(ctx.shell.relay());
    print_notification(ctx.shell.auth().relay());
    outcome
}

async fn dispatch(ctx: &mut AppContext, command: Command, view: ShellView) -> Result<()> {
    match command {
        Command::Status => {
            match view {
                ShellView::Workspace(_) => println!("Logged in."),
                ShellView::Landing { prompt_auth: true } => {
                    println!("Welcome! Run `tracker login` or `tracker signup` to get started.")
                }
                _ => println!("Not logged in."),
            }
            Ok(())
        }
        Command::Login { username, password } => {
            let password = password_or_prompt(password)?;
            let prompt = ctx.shell.auth_mut();
            prompt.open(AuthMode::Login);
            prompt.username = username;
            prompt.password = password;
            submit_auth(ctx).await
        }
        Command::Signup {
            username,
            email,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let prompt = ctx.shell.auth_mut();
            prompt.open(AuthMode::Signup);
            prompt.username = username;
            prompt.email = email;
            prompt.password = password;
            submit_auth(ctx).await
        }
        Command::Logout => {
            ctx.shell.logout();
            println!("Logged out.");
            Ok(())
        }
        other => {
            if !matches!(view, ShellView::Workspace(_)) {
                bail!("Not logged in. Run `tracker login <username>` first.");
            }
            workspace(ctx, other).await
        }
    }
}

async fn submit_auth(ctx: &mut AppContext) -> Result<()> {
    if ctx.shell.auth_mut().submit().await {
        Ok(())
    } else {
        bail!("{} failed", ctx.shell.auth().mode().title())
    }
}

async fn workspace(ctx: &mut AppContext, command: Command) -> Result<()> {
    match command {
        Command::Dashboard => {
            let cancel = ctx.shell.select(Tab::Dashboard);
            let mut page = ctx.dashboard();
            page.load(&cancel).await;
            if let Some(summary) = page.summary() {
                println!("Total applications:    {}", summary.total_applications);
                println!(
                    "This week / today:     {} / {}",
                    summary.applications_this_week, summary.applications_today
                );
                println!("Interviews scheduled:  {}", summary.interviews_scheduled);
                println!("Offers received:       {}", summary.offers_received);
                println!("High priority:         {}", summary.high_priority_applications);
                println!("Average hourly rate:   ${:.2}", summary.average_hourly_rate);
                println!("Success rate:          {:.1}%", summary.success_rate);
            }
            if !page.recent().is_empty() {
                println!("\nRecent applications");
                print_applications(page.recent());
            }
        }
        Command::Applications(sub) => {
            let cancel = ctx.shell.select(Tab::Applications);
            let mut list = ctx.applications();
            match sub {
                ApplicationsCommand::List => {
                    if list.load(&cancel).await {
                        print_applications(list.records());
                    }
                }
                ApplicationsCommand::Pipeline => {
                    if list.load(&cancel).await {
                        for column in pipeline(list.records(), APPLICATION_PIPELINE) {
                            println!("{} ({})", column.status, column.records.len());
                            for record in column.records {
                                println!(
                                    "  #{:<6} {} - {}",
                                    record.id.to_string(),
                                    record.data.company,
                                    record.data.role_title
                                );
                            }
                        }
                    }
                }
                ApplicationsCommand::Add(fields) => {
                    list.begin_create();
                    apply_fields(list.form_mut(), &fields)?;
                    if list.submit(&cancel).await {
                        println!("Application saved.");
                    }
                }
                ApplicationsCommand::Update { id, fields } => {
                    list.load(&cancel).await;
                    if !list.begin_edit(id) {
                        bail!("No application with id {id}");
                    }
                    apply_fields(list.form_mut(), &fields)?;
                    if list.submit(&cancel).await {
                        println!("Application updated.");
                    }
                }
                ApplicationsCommand::Delete { id, yes } => {
                    if list.delete(id, |question| yes || confirm(question)).await {
                        println!("Deleted application {id}.");
                    }
                }
            }
        }
        Command::Targets(sub) => {
            let cancel = ctx.shell.select(Tab::TargetCompanies);
            let mut targets = ctx.target_companies();
            match sub {
                TargetsCommand::List => {
                    if targets.load(&cancel).await {
                        print_targets(targets.records());
                    }
                }
                TargetsCommand::Search { query, add } => {
                    targets.load(&cancel).await;
                    let saved = targets.records().len();
                    let found = targets.search(&query, &cancel).await;
                    println!("{found} companies found.");
                    print_targets(targets.records());

                    let hits: Vec<TargetCompanyDraft> = targets.records()[saved..]
                        .iter()
                        .map(|record| record.data.clone())
                        .collect();
                    for pick in add {
                        let Some(hit) = pick.checked_sub(1).and_then(|i| hits.get(i)) else {
                            bail!("No search hit number {pick}");
                        };
                        if targets.add(hit.clone(), &cancel).await {
                            println!("{} added to target companies.", hit.name);
                        }
                    }
                }
                TargetsCommand::Delete { id, yes } => {
                    if targets.delete(id, |question| yes || confirm(question)).await {
                        println!("Deleted target company {id}.");
                    }
                }
            }
        }
        Command::Interviews => {
            let cancel = ctx.shell.select(Tab::InterviewPrep);
            let mut interviews = ctx.interview_prep();
            if interviews.load(&cancel).await {
                for record in interviews.records() {
                    let i = &record.data;
                    println!(
                        "{} | {} | {} | {}",
                        or_dash(&i.date),
                        or_dash(&i.company),
                        or_dash(&i.role),
                        or_dash(&i.kind)
                    );
                    if let Some(interviewer) = &i.interviewer {
                        println!("    with {interviewer}");
                    }
                    if let Some(questions) = &i.questions {
                        println!("    ask: {questions}");
                    }
                    if let Some(notes) = &i.notes {
                        println!("    notes: {notes}");
                    }
                }
            }
        }
        Command::Networking(sub) => {
            ctx.shell.select(Tab::Networking);
            let mut contacts = ctx.networking();
            match sub {
                NetworkingCommand::List => {}
                NetworkingCommand::Add(fields) => {
                    edit_local(&mut contacts, None, |form| apply_contact(form, &fields))?;
                }
                NetworkingCommand::Update { position, fields } => {
                    edit_local(&mut contacts, Some(position), |form| {
                        apply_contact(form, &fields)
                    })?;
                }
                NetworkingCommand::Delete { position, yes } => {
                    delete_local(&mut contacts, position, yes)?;
                }
            }
            print_contacts(contacts.records());
        }
        Command::Emails(sub) => {
            ctx.shell.select(Tab::EmailTracking);
            let mut emails = ctx.email_tracking();
            match sub {
                EmailsCommand::List => {}
                EmailsCommand::Add(fields) => {
                    edit_local(&mut emails, None, |form| apply_email(form, &fields))?;
                }
                EmailsCommand::Update { position, fields } => {
                    edit_local(&mut emails, Some(position), |form| apply_email(form, &fields))?;
                }
                EmailsCommand::Delete { position, yes } => {
                    delete_local(&mut emails, position, yes)?;
                }
            }
            print_emails(emails.records());
        }
        Command::UploadResume { file, add } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("resume")
                .to_string();
            let resume = ResumeFile::new(file_name, None, bytes)?;
            println!(
                "Uploading {} ({}, {:.2} MB)",
                resume.file_name(),
                resume.mime(),
                resume.size_mib()
            );

            let mut matcher = ctx.resume_matcher();
            if matcher.upload(resume).await {
                for (n, job) in matcher.matches().iter().enumerate() {
                    println!(
                        "{:>2}. {} - {} | {} | {}",
                        n + 1,
                        job.company,
                        job.position,
                        or_dash(&job.salary_range),
                        or_dash(&job.remote_policy)
                    );
                }
                for pick in add {
                    match pick.checked_sub(1).and_then(|i| matcher.matches().get(i)) {
                        Some(job) => {
                            matcher.add_to_targets(job).await;
                        }
                        None => bail!("No match number {pick}"),
                    }
                }
            }
        }
        other => bail!("{other:?} is not a workspace command"),
    }
    Ok(())
}

fn apply_fields(form: &mut ApplicationDraft, fields: &ApplicationFields) -> Result<()> {
    if let Some(company) = &fields.company {
        form.company = company.clone();
    }
    if let Some(role) = &fields.role {
        form.role_title = role.clone();
    }
    if let Some(location) = &fields.location {
        form.location = Some(location.clone());
    }
    if let Some(rate) = &fields.hourly_rate {
        form.hourly_rate = parse_hourly_rate(rate)?;
    }
    if let Some(date) = &fields.applied_date {
        form.applied_date = parse_form_date(date)?;
    }
    if let Some(status) = &fields.status {
        note_unlisted("status", status, application::STATUS_OPTIONS);
        form.status = status.clone();
    }
    if let Some(source) = &fields.source {
        form.source = Some(source.clone());
    }
    if let Some(contact) = &fields.contact {
        form.contact = Some(contact.clone());
    }
    if let Some(priority) = &fields.priority {
        note_unlisted("priority", priority, application::PRIORITY_OPTIONS);
        form.priority = Some(priority.clone());
    }
    Ok(())
}

/// Record id at a 1-based list position.
fn local_id_at<D: Entity>(list: &LocalList<D>, position: usize) -> Result<RecordId> {
    position
        .checked_sub(1)
        .and_then(|i| list.records().get(i))
        .map(|record| record.id)
        .with_context(|| format!("No {} at position {position}", D::LABEL))
}

/// Opens the form for a new record (`position` is `None`) or the record at
/// `position`, applies `fill` and submits. Validation failures surface
/// through the relay.
fn edit_local<D: Entity>(
    list: &mut LocalList<D>,
    position: Option<usize>,
    fill: impl FnOnce(&mut D) -> Result<()>,
) -> Result<()> {
    match position {
        Some(position) => {
            let id = local_id_at(list, position)?;
            list.begin_edit(id);
        }
        None => list.begin_create(),
    }
    fill(list.form_mut())?;
    if list.submit().is_some() {
        let mut label = D::LABEL.to_string();
        label[..1].make_ascii_uppercase();
        println!("{label} saved.");
    }
    Ok(())
}

fn delete_local<D: Entity>(list: &mut LocalList<D>, position: usize, yes: bool) -> Result<()> {
    let id = local_id_at(list, position)?;
    if list.delete(id, |question| yes || confirm(question)) {
        println!("Deleted {} {position}.", D::LABEL);
    }
    Ok(())
}

fn apply_contact(form: &mut ContactDraft, fields: &ContactFields) -> Result<()> {
    if let Some(name) = &fields.name {
        form.name = name.clone();
    }
    for (slot, value) in [
        (&mut form.title, &fields.title),
        (&mut form.company, &fields.company),
        (&mut form.email, &fields.email),
        (&mut form.phone, &fields.phone),
        (&mut form.linkedin, &fields.linkedin),
        (&mut form.how_met, &fields.how_met),
        (&mut form.next_action, &fields.next_action),
        (&mut form.notes, &fields.notes),
    ] {
        if value.is_some() {
            *slot = value.clone();
        }
    }
    if let Some(how_met) = &fields.how_met {
        note_unlisted("how met", how_met, contact::HOW_MET_OPTIONS);
    }
    if let Some(date) = &fields.date_met {
        form.date_met = parse_form_date(date)?;
    }
    if let Some(date) = &fields.next_action_date {
        form.next_action_date = parse_form_date(date)?;
    }
    Ok(())
}

fn apply_email(form: &mut EmailDraft, fields: &EmailFields) -> Result<()> {
    for (slot, value) in [
        (&mut form.company, &fields.company),
        (&mut form.contact, &fields.contact),
        (&mut form.subject, &fields.subject),
        (&mut form.status, &fields.status),
    ] {
        if let Some(value) = value {
            *slot = value.clone();
        }
    }
    if let Some(status) = &fields.status {
        note_unlisted("status", status, email::STATUS_OPTIONS);
    }
    if let Some(date) = &fields.date {
        form.date = parse_form_date(date)?;
    }
    if let Some(direction) = &fields.direction {
        form.direction = parse_direction(direction)?;
    }
    if let Some(date) = &fields.follow_up_date {
        form.follow_up_date = parse_form_date(date)?;
    }
    if fields.notes.is_some() {
        form.notes = fields.notes.clone();
    }
    Ok(())
}

/// Values outside the option list are kept; they just render with the
/// fallback style.
fn note_unlisted(field: &str, value: &str, options: &[&str]) {
    if !options.contains(&value) {
        eprintln!("note: {field} '{value}' is not one of: {}", options.join(", "));
    }
}

fn print_contacts(records: &[Record<ContactDraft>]) {
    for (n, record) in records.iter().enumerate() {
        let c = &record.data;
        println!(
            "{:>2}. {} | {} | {} | next: {} ({})",
            n + 1,
            c.name,
            or_dash(&c.title),
            or_dash(&c.company),
            or_dash(&c.next_action),
            c.next_action_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
        );
    }
}

fn print_emails(records: &[Record<EmailDraft>]) {
    for (n, record) in records.iter().enumerate() {
        let e = &record.data;
        println!(
            "{:>2}. {} | {:<8} | {} | {} | {}",
            n + 1,
            e.date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            e.direction.as_str(),
            e.company,
            e.subject,
            e.status
        );
    }
}

fn print_applications(records: &[Record<ApplicationDraft>]) {
    for record in records {
        let app = &record.data;
        println!(
            "#{:<6} {:<24} {:<28} {:<12} [{}] [{}] {}",
            record.id.to_string(),
            app.company,
            app.role_title,
            app.applied_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            StatusClass::of(app.status()).label(),
            PriorityClass::of(app.priority()).label(),
            app.hourly_rate.map(|r| format!("${r:.2}/h")).unwrap_or_default()
        );
    }
}

fn print_targets(records: &[Record<TargetCompanyDraft>]) {
    for record in records {
        let t = &record.data;
        let saved = if record.id.is_local() { "unsaved" } else { "saved" };
        println!(
            "{:<38} {:<24} {:<20} {:<10} {} [{}] ({saved})",
            record.id.to_string(),
            t.name,
            or_dash(&t.industry),
            or_dash(&t.remote),
            t.status,
            PriorityClass::of(t.priority()).label()
        );
    }
}

/// Prints what the relay is showing and clears it.
fn print_notification(relay: &NotificationRelay) {
    match relay.current() {
        Some(Notification {
            kind: NotificationKind::Success,
            text,
        }) => println!("{text}"),
        Some(Notification {
            kind: NotificationKind::Error,
            text,
        }) => eprintln!("error: {text}"),
        None => return,
    }
    relay.dismiss();
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn confirm(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
