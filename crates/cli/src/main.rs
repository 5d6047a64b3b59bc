//! Inspect and edit the saved VR controller binding profiles.
//!
//! Examples:
//!   xrbind list
//!   xrbind show /interaction_profiles/oculus/touch_controller
//!   xrbind seed /interaction_profiles/oculus/touch_controller --from defaults.json
//!   xrbind replace /interaction_profiles/oculus/touch_controller --from edited.json
//!   xrbind validate /interaction_profiles/oculus/touch_controller
//!   xrbind delete /interaction_profiles/oculus/touch_controller
//!   xrbind clear --yes
//!
//! Notes:
//! - Raw binding files are JSON arrays of {"action", "inputPath"} records, in
//!   the order conflicts should be resolved (first occurrence wins).
//! - Without --root, profiles live under the per-user data dir.

use std::{fs, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use serde::Deserialize;

// Use the core crate as the primary API.
use xrbind_core::prelude::*;

// ───────────────────────────── CLI Args ─────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "xrbind", version, about = "Inspect and edit saved VR binding profiles")]
struct Args {
    /// Root directory holding the per-profile binding files
    /// (defaults to the per-user data dir)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all stored profile ids
    List,
    /// Print a profile's bindings, ownership info and per-input legality
    Show { profile: String },
    /// Save raw bindings for a profile unless it already has a file
    Seed {
        profile: String,
        /// JSON array of {"action", "inputPath"} records
        #[arg(long, value_name = "PATH")]
        from: PathBuf,
    },
    /// Resolve conflicts and overwrite a profile's bindings
    Replace {
        profile: String,
        /// JSON array of {"action", "inputPath"} records
        #[arg(long, value_name = "PATH")]
        from: PathBuf,
    },
    /// Check per-input legality for a profile
    Validate {
        profile: String,
        /// Check only this input path (default: every bound input)
        #[arg(long)]
        input: Option<String>,
    },
    /// Delete one stored profile
    Delete { profile: String },
    /// Delete every stored profile
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

// ───────────────────────────── Logger ─────────────────────────────

#[derive(Clone)]
struct StderrLogger {
    verbose: bool,
}

// All levels go to stderr; stdout is reserved for command output.
impl RegistryLog for StderrLogger {
    fn info(&self, msg: &str) {
        eprintln!("INFO:  {msg}");
    }
    fn warn(&self, msg: &str) {
        eprintln!("WARN:  {msg}");
    }
    fn error(&self, msg: &str) {
        eprintln!("ERROR: {msg}");
    }
    fn debug(&self, msg: &str) {
        if self.verbose {
            eprintln!("DEBUG: {msg}");
        }
    }
}

// ───────────────────────────── Raw binding files ─────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBinding {
    action: String,
    input_path: String,
}

fn read_raw_bindings(path: &PathBuf) -> Result<Vec<(String, String)>, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
    let raw: Vec<RawBinding> =
        serde_json::from_str(&content).map_err(|e| format!("parse {}: {e}", path.display()))?;
    Ok(raw.into_iter().map(|b| (b.action, b.input_path)).collect())
}

// ───────────────────────────── main ─────────────────────────────

fn main() -> Result<(), String> {
    let args = Args::parse();

    let logger: Arc<dyn RegistryLog> = Arc::new(StderrLogger {
        verbose: args.verbose,
    });

    let root = match args.root {
        Some(r) => r,
        None => default_bindings_root("xrbind")?,
    };
    logger.debug(&format!("bindings root: {}", root.display()));

    let registry = BindingRegistry::new(ProfileStore::new(root), Arc::clone(&logger));

    match args.command {
        Command::List => {
            let profiles = registry.available_profiles();
            if profiles.is_empty() {
                println!("(no stored profiles)");
            }
            for p in profiles {
                println!("{p}");
            }
            Ok(())
        }

        Command::Show { profile } => {
            let Some(pb) = registry.profile(&profile) else {
                return Err(format!("no stored bindings for {profile}"));
            };
            println!("{} — {} binding(s)", pb.profile_id, pb.entries.len());
            for e in &pb.entries {
                println!(
                    "  {:<40} -> {:<45} [{} / {}]",
                    e.action,
                    e.input_path,
                    e.namespace,
                    category_label(&e.action)
                );
            }
            let conflicted: Vec<_> = pb
                .namespaces
                .iter()
                .filter(|(_, info)| info.conflict_count > 0)
                .collect();
            if !conflicted.is_empty() {
                println!("conflicted actions:");
                for (action, info) in conflicted {
                    println!(
                        "  {action}: {} rejected claim(s), owned by {}",
                        info.conflict_count, info.namespace
                    );
                }
            }
            print_validation(&pb, None);
            Ok(())
        }

        Command::Seed { profile, from } => {
            let raw = read_raw_bindings(&from)?;
            if registry.seed_if_absent(&profile, &raw)? {
                println!("seeded {profile} with {} raw binding(s)", raw.len());
            } else {
                println!("{profile} already has stored bindings, nothing done");
            }
            Ok(())
        }

        Command::Replace { profile, from } => {
            let raw = read_raw_bindings(&from)?;
            let resolution = registry.replace(&profile, &raw)?;
            println!(
                "replaced {profile}: {} entries kept, {} action(s) conflicted",
                resolution.entries.len(),
                resolution.conflicts.len()
            );
            for (action, rejected) in &resolution.conflicts {
                println!("  {action}: rejected {rejected:?}");
            }
            Ok(())
        }

        Command::Validate { profile, input } => {
            let Some(pb) = registry.profile(&profile) else {
                return Err(format!("no stored bindings for {profile}"));
            };
            print_validation(&pb, input.as_deref());
            Ok(())
        }

        Command::Delete { profile } => {
            registry.delete(&profile)?;
            println!("deleted {profile}");
            Ok(())
        }

        Command::Clear { yes } => {
            if !yes {
                return Err("refusing to clear without --yes".to_string());
            }
            registry.clear_all()?;
            println!("cleared all stored profiles");
            Ok(())
        }
    }
}

// ───────────────────────────── helpers ─────────────────────────────

fn print_validation(pb: &ProfileBindings, only_input: Option<&str>) {
    let inputs: Vec<&str> = match only_input {
        Some(i) => vec![i],
        None => pb.input_paths(),
    };
    for input in inputs {
        let v = validate_input(input, pb);
        let name = display_name(&pb.profile_id, input);
        match v.reason {
            None => println!("  OK   {name} ({input})"),
            Some(reason) => println!("  BAD  {name} ({input}): {reason}"),
        }
    }
}
