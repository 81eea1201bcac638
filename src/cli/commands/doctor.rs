//! Doctor command - verify configuration and embedding provider.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Recap Doctor");
    println!();

    let checks = vec![
        check_config_file(),
        check_render_settings(settings),
        check_embedding(settings),
        check_output_dir(settings),
    ];
    for check in &checks {
        check.print();
    }
    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s) found.", errors));
        return Err(anyhow::anyhow!("{} doctor check(s) failed", errors));
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Recap is ready to use.");
    }

    Ok(())
}

fn check_config_file() -> CheckResult {
    let path = Settings::default_config_path();
    if !path.exists() {
        return CheckResult::warning(
            "Config file",
            &format!("{} (using defaults)", path.display()),
            "Create one with: recap config init",
        );
    }
    match Settings::load_from(Some(&path)) {
        Ok(_) => CheckResult::ok("Config file", &format!("{}", path.display())),
        Err(e) => CheckResult::error("Config file", &e.to_string(), "Fix or delete the config file"),
    }
}

fn check_render_settings(settings: &Settings) -> CheckResult {
    match settings.validate() {
        Ok(()) => CheckResult::ok(
            "Render settings",
            &format!(
                "{}fps, {}ms credits, {} chars per line",
                settings.render.frame_rate,
                settings.render.credits_ms,
                settings.render.max_line_length
            ),
        ),
        Err(e) => CheckResult::error("Render settings", &e.to_string(), "Edit the [render] section"),
    }
}

fn check_embedding(settings: &Settings) -> CheckResult {
    let name = format!("Embeddings ({})", settings.embedding.provider);
    match preflight::check(&settings.embedding) {
        Ok(()) => CheckResult::ok(&name, &settings.embedding.model),
        Err(e) => CheckResult::error(
            &name,
            &e.to_string(),
            "Set OPENAI_API_KEY or pass --embeddings with a precomputed table",
        ),
    }
}

fn check_output_dir(settings: &Settings) -> CheckResult {
    let dir = settings.output_dir();
    if dir.is_dir() {
        CheckResult::ok("Output directory", &format!("{}", dir.display()))
    } else {
        CheckResult::warning(
            "Output directory",
            &format!("{} (will be created)", dir.display()),
            "Directory will be created on first use",
        )
    }
}
