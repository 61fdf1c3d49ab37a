//! The fixed six-stage build pipeline
//!
//! Stages run strictly in order, each depending on the filesystem state
//! left by the previous one. The first failing tool aborts the whole build;
//! partial artifacts are left in place for inspection.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::fs;
use tracing::info;
use walkdir::WalkDir;

use droidbuild_core::{Invocation, ProjectDescriptor, Result, ToolRunner};

use crate::toolchain::{Toolchain, JAVAC};

/// Output directories wiped and recreated at the start of every build.
const OUT_DIRS: [&str; 3] = ["classes", "dexed", "build"];

/// The unsigned APK shell produced by resource compilation, relative to
/// the project root.
const UNSIGNED_APK: &str = "build/unsigned.apk";

/// The final signed artifact, relative to the project root.
const SIGNED_APK: &str = "build/final.apk";

/// One step of the fixed pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clean,
    Resources,
    Compile,
    Dex,
    Package,
    Sign,
}

impl Stage {
    /// Execution order. Never reordered, never skipped.
    pub const ALL: [Stage; 6] = [
        Stage::Clean,
        Stage::Resources,
        Stage::Compile,
        Stage::Dex,
        Stage::Package,
        Stage::Sign,
    ];

    /// Short label used when tagging failures.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Clean => "clean",
            Stage::Resources => "resources",
            Stage::Compile => "compile",
            Stage::Dex => "dex",
            Stage::Package => "package",
            Stage::Sign => "sign",
        }
    }

    /// Progress narration printed when the stage starts.
    pub fn narration(self) -> &'static str {
        match self {
            Stage::Clean => "Cleaning output directories...",
            Stage::Resources => "Packing resources with aapt...",
            Stage::Compile => "Compiling with javac...",
            Stage::Dex => "Translating into dex with d8...",
            Stage::Package => "Packing into APK with aapt...",
            Stage::Sign => "Signing...",
        }
    }
}

/// Result of a completed build.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Signed APK, relative to the project root.
    pub apk: PathBuf,
    /// Total wall-clock build time.
    pub elapsed: Duration,
}

/// Drives the six stages against one project directory.
pub struct BuildPipeline<'a, R> {
    project_dir: &'a Path,
    descriptor: &'a ProjectDescriptor,
    toolchain: Toolchain,
    runner: &'a R,
}

impl<'a, R: ToolRunner> BuildPipeline<'a, R> {
    pub fn new(project_dir: &'a Path, descriptor: &'a ProjectDescriptor, runner: &'a R) -> Self {
        let toolchain = Toolchain::from_descriptor(descriptor);
        Self {
            project_dir,
            descriptor,
            toolchain,
            runner,
        }
    }

    /// Run every stage in order and report the elapsed time.
    pub async fn run(&self) -> Result<BuildSummary> {
        let start = Instant::now();
        for stage in Stage::ALL {
            info!("{}", stage.narration());
            self.run_stage(stage)
                .await
                .map_err(|err| err.in_stage(stage.label()))?;
        }
        Ok(BuildSummary {
            apk: PathBuf::from(SIGNED_APK),
            elapsed: start.elapsed(),
        })
    }

    async fn run_stage(&self, stage: Stage) -> Result<()> {
        match stage {
            Stage::Clean => self.clean().await,
            Stage::Resources => self.compile_resources().await,
            Stage::Compile => self.compile_sources().await,
            Stage::Dex => self.dex().await,
            Stage::Package => self.package().await,
            Stage::Sign => self.sign().await,
        }
    }

    /// Remove and recreate every output directory. A directory that does
    /// not exist yet is not an error.
    async fn clean(&self) -> Result<()> {
        for dir in OUT_DIRS {
            let path = self.project_dir.join(dir);
            match fs::remove_dir_all(&path).await {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
            fs::create_dir_all(&path).await?;
        }
        Ok(())
    }

    async fn compile_resources(&self) -> Result<()> {
        let invocation = Invocation::new(self.toolchain.aapt())
            .arg("package")
            .arg("-f")
            .arg("-m")
            .arg("-J")
            .arg("src")
            .arg("-M")
            .arg("AndroidManifest.xml")
            .arg("-S")
            .arg("res")
            .arg("-I")
            .arg(self.toolchain.android_jar())
            .arg("-F")
            .arg(UNSIGNED_APK)
            .current_dir(self.project_dir);
        self.runner.run(invocation).await
    }

    async fn compile_sources(&self) -> Result<()> {
        let sources = self.files_with_extension("src", "java")?;
        let invocation = Invocation::new(JAVAC)
            .arg("-source")
            .arg(&self.descriptor.java_target)
            .arg("-target")
            .arg(&self.descriptor.java_target)
            .arg("-bootclasspath")
            .arg(self.toolchain.android_jar())
            .arg("-d")
            .arg("classes")
            .args(sources)
            .current_dir(self.project_dir);
        self.runner.run(invocation).await
    }

    async fn dex(&self) -> Result<()> {
        let classes = self.files_with_extension("classes", "class")?;
        let invocation = Invocation::new(self.toolchain.d8())
            .arg("--output")
            .arg("dexed")
            .args(classes)
            .current_dir(self.project_dir);
        self.runner.run(invocation).await
    }

    async fn package(&self) -> Result<()> {
        let dex_files = self.files_with_extension("dexed", "dex")?;
        let invocation = Invocation::new(self.toolchain.aapt())
            .arg("add")
            .arg("-k")
            .arg(UNSIGNED_APK)
            .args(dex_files)
            .current_dir(self.project_dir);
        self.runner.run(invocation).await
    }

    async fn sign(&self) -> Result<()> {
        // The store password travels as a file reference, never as
        // literal argv text.
        let invocation = Invocation::new(self.toolchain.apksigner())
            .arg("sign")
            .arg("--ks")
            .arg("signing/keystore.jks")
            .arg("--out")
            .arg(SIGNED_APK)
            .arg("--ks-pass")
            .arg("file:signing/storepass.txt")
            .arg(UNSIGNED_APK)
            .current_dir(self.project_dir);
        self.runner.run(invocation).await
    }

    /// All files under `<project>/<root>` with the given extension, as
    /// project-relative paths in deterministic order.
    fn files_with_extension(&self, root: &str, ext: &str) -> Result<Vec<PathBuf>> {
        let base = self.project_dir.join(root);
        let mut files = Vec::new();
        for entry in WalkDir::new(&base) {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().is_some_and(|e| e == ext) {
                let relative = entry
                    .path()
                    .strip_prefix(self.project_dir)
                    .unwrap_or(entry.path());
                files.push(relative.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}
