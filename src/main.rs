//! bhasha-audio: generate the BhashaQuest audio clips
//!
//! ```text
//! bhasha-audio                 generate every clip into ../assets/audio
//! bhasha-audio --list          list the clips already generated
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bhasha_audio::engines::{self, EngineParamsBuilder};
use bhasha_audio::generate::{GenerateError, Generator};
use bhasha_audio::list::list;
use bhasha_audio::manifest::Manifest;
use bhasha_audio::SynthesisEngine;
use clap::Parser;
use log::{error, warn};

#[derive(Parser, Debug)]
#[command(name = "bhasha-audio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generates the BhashaQuest audio clips with Google Translate text-to-speech")]
struct Cli {
    /// List existing audio files instead of generating
    #[arg(long)]
    list: bool,

    /// Output directory (default: ../assets/audio next to the executable)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Request slower speech
    #[arg(long)]
    slow: bool,

    /// Google Translate domain suffix
    #[arg(long, value_name = "TLD", default_value = "com")]
    tld: String,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Unrecognised arguments; ignored, generation still runs
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<String>,
}

fn init_logger(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// `<exe dir>/../assets/audio`, so a binary in `scripts/` or `bin/` finds the
/// `assets` folder beside that directory.
fn output_dir_for_exe(exe: &Path) -> PathBuf {
    let bin_dir = exe.parent().unwrap_or(Path::new("."));
    bin_dir
        .parent()
        .unwrap_or(bin_dir)
        .join("assets")
        .join("audio")
}

fn default_output_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => output_dir_for_exe(&exe),
        Err(e) => {
            warn!("Cannot locate executable ({e}), using ./assets/audio");
            Path::new("assets").join("audio")
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    for arg in &cli.rest {
        warn!("Ignoring unrecognised argument '{arg}'");
    }

    let manifest = Manifest::builtin();
    let output_dir = cli.output.clone().unwrap_or_else(default_output_dir);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        return match list(&manifest, &output_dir).and_then(|l| l.render(&mut out)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Listing failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let params = match EngineParamsBuilder::default()
        .slow(cli.slow)
        .tld(cli.tld.clone())
        .build()
    {
        Ok(params) => params,
        Err(e) => {
            error!("Invalid engine settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut engine = engines::default_engine(params);

    if run_generate(&manifest, &output_dir, engine.as_mut(), &mut out) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Generate every clip and print the closing message.
///
/// Returns true only when every entry was written; an unavailable engine or
/// an uncreatable output directory counts as failure.
fn run_generate(
    manifest: &Manifest,
    output_dir: &Path,
    engine: &mut dyn SynthesisEngine,
    out: &mut dyn Write,
) -> bool {
    let rule = "=".repeat(70);
    let _ = writeln!(out, "\n{rule}\n{:^70}\n{rule}\n", "BhashaQuest Audio Generator");

    let succeeded = match Generator::new(manifest, output_dir).generate(engine, out) {
        Ok(report) => report.is_success(),
        Err(GenerateError::DependencyUnavailable { .. }) => false,
        Err(e) => {
            error!("Generation failed: {e}");
            let _ = writeln!(out, "Error: {e}");
            false
        }
    };

    let closing = if succeeded {
        "Audio generation complete!\n\
         \nTest playback in BhashaQuest:\n   \
         1. Build and run the app\n   \
         2. Start a 'Numbers & Counting' lesson\n   \
         3. Click the Listen button"
    } else {
        "Audio generation failed. Check errors above."
    };
    let _ = writeln!(out, "{closing}");

    succeeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhasha_audio::engines::Unavailable;
    use bhasha_audio::SynthesisResult;
    use clap::CommandFactory;

    struct EchoEngine {
        fail_on: Option<&'static str>,
    }

    impl SynthesisEngine for EchoEngine {
        fn name(&self) -> &str {
            "echo"
        }

        fn synthesize(
            &mut self,
            text: &str,
            _lang: &str,
        ) -> Result<SynthesisResult, Box<dyn std::error::Error>> {
            if self.fail_on == Some(text) {
                return Err("service error".into());
            }
            Ok(SynthesisResult {
                audio: text.as_bytes().to_vec(),
            })
        }
    }

    fn generate_with(engine: &mut dyn SynthesisEngine) -> (bool, String) {
        let tmp = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let ok = run_generate(&Manifest::builtin(), tmp.path(), engine, &mut out);
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_means_generate() {
        let cli = Cli::try_parse_from(["bhasha-audio"]).unwrap();
        assert!(!cli.list);
        assert_eq!(cli.output, None);
        assert_eq!(cli.tld, "com");
        assert!(cli.rest.is_empty());
    }

    #[test]
    fn list_flag() {
        let cli = Cli::try_parse_from(["bhasha-audio", "--list"]).unwrap();
        assert!(cli.list);
    }

    #[test]
    fn unknown_arguments_fall_through_to_generation() {
        let cli = Cli::try_parse_from(["bhasha-audio", "--lst", "extra"]).unwrap();
        assert!(!cli.list);
        assert_eq!(cli.rest, vec!["--lst".to_string(), "extra".to_string()]);
    }

    #[test]
    fn options_with_values() {
        let cli = Cli::try_parse_from([
            "bhasha-audio",
            "--output",
            "/tmp/audio",
            "--tld",
            "co.in",
            "--slow",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/audio")));
        assert_eq!(cli.tld, "co.in");
        assert!(cli.slow);
    }

    #[test]
    fn output_dir_sits_beside_the_executable_directory() {
        let dir = output_dir_for_exe(Path::new("/tmp/moved/scripts/bhasha-audio"));
        assert_eq!(dir, PathBuf::from("/tmp/moved/assets/audio"));
    }

    #[test]
    fn output_dir_for_exe_at_filesystem_root() {
        let dir = output_dir_for_exe(Path::new("/bhasha-audio"));
        assert_eq!(dir, PathBuf::from("/assets/audio"));
    }

    #[test]
    fn default_output_dir_follows_current_exe() {
        let exe = std::env::current_exe().unwrap();
        let expected = exe.parent().unwrap().parent().unwrap().join("assets/audio");
        assert_eq!(default_output_dir(), expected);
    }

    #[test]
    fn all_entries_written_succeeds() {
        let (ok, output) = generate_with(&mut EchoEngine { fail_on: None });
        assert!(ok);
        assert!(output.contains("Audio generation complete!"));
    }

    #[test]
    fn one_failed_entry_fails() {
        let (ok, output) = generate_with(&mut EchoEngine {
            fail_on: Some("das"),
        });
        assert!(!ok);
        assert!(output.contains("Audio generation failed"));
    }

    #[test]
    fn unavailable_engine_fails() {
        let (ok, output) = generate_with(&mut Unavailable::new("no engine compiled in"));
        assert!(!ok);
        assert!(output.contains("no engine compiled in"));
        assert!(output.contains("Audio generation failed"));
    }

    #[test]
    fn uncreatable_output_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("audio");
        std::fs::write(&blocker, b"").unwrap();
        let mut out = Vec::new();

        let ok = run_generate(
            &Manifest::builtin(),
            &blocker,
            &mut EchoEngine { fail_on: None },
            &mut out,
        );

        assert!(!ok);
    }
}
