//! droidbuild - minimal Android APK build driver
//!
//! Scaffolds a project skeleton and drives the external SDK tools (aapt,
//! javac, d8, apksigner) through a fixed six-stage pipeline producing a
//! signed APK. One subcommand per invocation: `new`, `build`, `checkupdate`.

mod update;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use droidbuild_build_engine::BuildPipeline;
use droidbuild_core::{Error, ProjectDescriptor, StdinPrompt, SystemRunner, TOOL_NAME};
use droidbuild_scaffold::Scaffolder;

use update::UpdateChecker;

/// Published tool version, compared against the remote descriptor.
const VERSION: u32 = 1;

/// Remote version descriptor endpoint.
const UPDATE_URL: &str =
    "https://raw.githubusercontent.com/droidbuild/droidbuild/refs/heads/version/latest-version";

/// Where users get new releases.
const DOWNLOAD_URL: &str = "https://github.com/droidbuild/droidbuild";

/// SDK path placeholder written into new project descriptors.
fn default_sdk_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Android")
        .join("Sdk")
}

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| TOOL_NAME.to_string());
    let Some(subcommand) = args.next() else {
        print_usage(&program);
        return ExitCode::FAILURE;
    };

    match subcommand.as_str() {
        "new" => run_new().await,
        "build" => run_build().await,
        "checkupdate" => {
            let checker = UpdateChecker::new(UPDATE_URL, VERSION);
            update::run_check(&checker, DOWNLOAD_URL).await
        }
        _ => {
            eprintln!("Unknown subcommand!");
            print_usage(&program);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("usage: {program} [subcommand]");
    eprintln!("commands:");
    eprintln!("  new - creates new project in current dir");
    eprintln!("  build - builds current project");
    eprintln!("  checkupdate - checks for {TOOL_NAME} updates");
}

async fn run_new() -> ExitCode {
    let scaffolder = Scaffolder::new(default_sdk_path());
    let mut prompts = StdinPrompt;
    match scaffolder
        .create_project(Path::new("."), &mut prompts, &SystemRunner)
        .await
    {
        Ok(()) => {
            println!("Finished.");
            ExitCode::SUCCESS
        }
        Err(Error::ProjectAlreadyExists(_)) => {
            eprintln!("Project already exists!");
            ExitCode::FAILURE
        }
        Err(err) => report_fatal(err),
    }
}

async fn run_build() -> ExitCode {
    println!("{TOOL_NAME} v{VERSION}");

    let project_dir = Path::new(".");
    let descriptor = match ProjectDescriptor::load(project_dir) {
        Ok(descriptor) => descriptor,
        Err(Error::ProjectNotFound(_)) => {
            eprintln!("Project does not exist!");
            return ExitCode::FAILURE;
        }
        Err(err) => return report_fatal(err),
    };

    info!("Building for Android SDK {}", descriptor.sdk_target);
    let pipeline = BuildPipeline::new(project_dir, &descriptor, &SystemRunner);
    match pipeline.run().await {
        Ok(summary) => {
            println!(
                "Done! Built {} in {:.2} second(s)",
                summary.apk.display(),
                summary.elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(err) => report_fatal(err),
    }
}

/// Fatal-failure rendering: the failing tool's captured stdout goes to our
/// stdout, its stderr to our stderr, then a terminal diagnostic.
fn report_fatal(err: Error) -> ExitCode {
    if let Error::Tool(failure) = &err {
        println!("{}", failure.stdout);
        eprintln!("{}", failure.stderr);
    }
    eprintln!("{err}");
    eprintln!("Exiting.");
    ExitCode::FAILURE
}
