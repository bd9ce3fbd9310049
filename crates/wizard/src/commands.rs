//! Command implementations. Output goes to the supplied writer.

use std::io::Write;

use anyhow::Context;
use chrono::Utc;

use ncahp_core::config::WizardConfig;
use ncahp_core::draft::DraftPersistence;
use ncahp_core::profession::CATEGORIES;
use ncahp_core::registration::RegistrationTypeCode;
use ncahp_core::routes;
use ncahp_core::schema::{resolve_code, schema, steps_for_code};
use ncahp_core::storage::DirectoryStorage;
use ncahp_core::validation::ValidationMode;
use ncahp_core::wizard::{Applicant, WizardController};

use crate::cli::{Cmd, DraftAction};
use crate::render::TextRenderer;

pub fn run<W: Write>(cmd: &Cmd, config: &WizardConfig, out: &mut W) -> anyhow::Result<()> {
    match cmd {
        Cmd::Schemas => list_schemas(out),
        Cmd::Steps { code } => list_steps(code, out),
        Cmd::Preview { code } => preview(code, config, out),
        Cmd::Professions => list_professions(out),
        Cmd::Draft { action } => draft(action, config, out),
        Cmd::Route { path } => route(path, out),
    }
}

fn list_schemas<W: Write>(out: &mut W) -> anyhow::Result<()> {
    for code in RegistrationTypeCode::ALL {
        let s = schema(code.variant());
        writeln!(
            out,
            "{code}  {:<40} {} ({} steps)",
            code.label(),
            s.name,
            s.len()
        )?;
    }
    Ok(())
}

fn list_steps<W: Write>(raw: &str, out: &mut W) -> anyhow::Result<()> {
    let code = resolve_code(raw)?;
    writeln!(out, "{} - {}", code, schema(code.variant()).name)?;
    for step in steps_for_code(code) {
        let optional = if step.is_optional { " (optional)" } else { "" };
        writeln!(
            out,
            "{:>2}. {}: {}{optional}",
            step.id, step.title, step.description
        )?;
    }
    Ok(())
}

fn preview<W: Write>(raw: &str, config: &WizardConfig, out: &mut W) -> anyhow::Result<()> {
    let code = resolve_code(raw)?;
    let config = WizardConfig {
        validation_mode: ValidationMode::Bypass,
        ..config.clone()
    };
    let mut wizard = WizardController::new(config, &Applicant::default(), Utc::now())?;
    wizard.select_registration_type(code)?;

    loop {
        writeln!(out, "{}", wizard.render_with(&TextRenderer)?)?;
        if !wizard.next() {
            break;
        }
    }
    Ok(())
}

fn list_professions<W: Write>(out: &mut W) -> anyhow::Result<()> {
    for category in CATEGORIES {
        writeln!(out, "{} ({})", category.name, category.id)?;
        for profession in category.professions {
            writeln!(out, "  - {profession}")?;
        }
    }
    Ok(())
}

fn draft<W: Write>(action: &DraftAction, config: &WizardConfig, out: &mut W) -> anyhow::Result<()> {
    let storage = DirectoryStorage::open(&config.draft_dir).with_context(|| {
        format!("Failed to open draft directory {}", config.draft_dir.display())
    })?;
    let mut drafts = DraftPersistence::new(storage, config);

    match action {
        DraftAction::Show => match drafts.load(Utc::now())? {
            None => writeln!(out, "No saved draft")?,
            Some(snapshot) => {
                let s = schema(snapshot.active_form_type);
                let code = snapshot
                    .registration_type
                    .map_or("not selected", |c| c.as_str());
                writeln!(out, "Form:       {}", s.name)?;
                writeln!(out, "Type:       {code}")?;
                writeln!(
                    out,
                    "Step:       {}/{} (furthest {})",
                    snapshot.current_step,
                    s.len(),
                    snapshot.highest_step_reached
                )?;
                writeln!(out, "Saved at:   {}", snapshot.saved_at.to_rfc3339())?;
                if !snapshot.detached_attachments.is_empty() {
                    writeln!(out, "Re-attach:")?;
                    for file in &snapshot.detached_attachments {
                        writeln!(out, "  {} ({})", file.path, file.file_name)?;
                    }
                }
            }
        },
        DraftAction::Clear => {
            drafts.clear()?;
            writeln!(out, "Draft cleared")?;
        }
    }
    Ok(())
}

fn route<W: Write>(path: &str, out: &mut W) -> anyhow::Result<()> {
    let found = routes::resolve(path);
    writeln!(out, "{}", serde_json::to_string_pretty(&found)?)?;
    Ok(())
}
