//! droidbuild scaffolder
//!
//! Creates a new, empty project in a directory: package-derived source
//! tree, manifest, default activity and layout, project descriptor, and a
//! signing keystore generated through the JDK's `keytool`.
//!
//! Any filesystem or subprocess failure mid-sequence propagates fatally;
//! partially created files are left as-is.

pub mod templates;

use std::path::{Path, PathBuf};

use tracing::info;

use droidbuild_core::{
    Error, Invocation, ProjectDescriptor, PromptSource, Result, ToolRunner,
};

/// `keytool` ships with the JDK and is resolved from `PATH`.
const KEYTOOL: &str = "keytool";

/// Key pair parameters for the generated keystore.
const KEY_ALG: &str = "RSA";
const KEY_SIZE: &str = "2048";
const KEY_VALIDITY_DAYS: &str = "10000";
const KEY_ALIAS: &str = "mainkey";

/// Answers collected up front, before any file is written.
#[derive(Debug)]
struct Answers {
    project_name: String,
    package: String,
    store_pass: String,
    java_target: String,
    sdk_target: String,
}

/// One-time project-initialization generator.
pub struct Scaffolder {
    /// SDK path placeholder written into new descriptors; the user edits
    /// it afterwards if their SDK lives elsewhere.
    default_sdk_path: PathBuf,
}

impl Scaffolder {
    pub fn new(default_sdk_path: PathBuf) -> Self {
        Self { default_sdk_path }
    }

    /// Create a new project in `dir`.
    ///
    /// Fails with [`Error::ProjectAlreadyExists`] before asking anything
    /// if a descriptor is already present.
    pub async fn create_project<P, R>(&self, dir: &Path, prompts: &mut P, runner: &R) -> Result<()>
    where
        P: PromptSource,
        R: ToolRunner,
    {
        if ProjectDescriptor::exists_in(dir) {
            return Err(Error::ProjectAlreadyExists(dir.to_path_buf()));
        }

        let answers = collect_answers(prompts)?;
        info!("Creating project files...");

        let package_dir = dir.join("src").join(answers.package.replace('.', "/"));
        std::fs::create_dir_all(&package_dir)?;
        std::fs::create_dir_all(dir.join("res").join("layout"))?;
        std::fs::create_dir_all(dir.join("signing"))?;

        std::fs::write(
            dir.join("AndroidManifest.xml"),
            templates::manifest_xml(&answers.package, &answers.project_name),
        )?;

        let descriptor = ProjectDescriptor::new(
            self.default_sdk_path.clone(),
            answers.java_target.clone(),
            answers.sdk_target.clone(),
        );
        descriptor.save(dir)?;

        std::fs::write(
            package_dir.join("MainActivity.java"),
            templates::main_activity_java(&answers.package),
        )?;
        std::fs::write(
            dir.join("res").join("layout").join("activity_main.xml"),
            templates::ACTIVITY_MAIN_XML,
        )?;

        info!("Generating keystore...");
        let keystore = Invocation::new(KEYTOOL)
            .arg("-genkeypair")
            .arg("-v")
            .arg("-keystore")
            .arg("signing/keystore.jks")
            .arg("-keyalg")
            .arg(KEY_ALG)
            .arg("-keysize")
            .arg(KEY_SIZE)
            .arg("-validity")
            .arg(KEY_VALIDITY_DAYS)
            .arg("-alias")
            .arg(KEY_ALIAS)
            .arg("-storepass")
            .arg(&answers.store_pass)
            .current_dir(dir);
        runner.run(keystore).await?;

        // The signer later reads this back via a file reference.
        std::fs::write(
            dir.join("signing").join("storepass.txt"),
            &answers.store_pass,
        )?;

        Ok(())
    }
}

/// Interactive question flow. The six-character password minimum is
/// documented in the prompt only, matching keytool's own enforcement.
fn collect_answers<P: PromptSource>(prompts: &mut P) -> Result<Answers> {
    Ok(Answers {
        project_name: prompts.ask("Project name?")?,
        package: prompts.ask("Package name?")?,
        store_pass: prompts.ask("Keystore password? (6 characters min)")?,
        java_target: prompts.ask_or("Target Java version? [default: 1.8]", "1.8")?,
        sdk_target: prompts.ask_or("Target Android SDK version? [default: 35]", "35")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use droidbuild_core::ScriptedPrompt;

    struct RecordingRunner {
        calls: Mutex<Vec<Invocation>>,
    }

    impl RecordingRunner {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl ToolRunner for RecordingRunner {
        async fn run(&self, invocation: Invocation) -> Result<()> {
            self.calls.lock().unwrap().push(invocation);
            Ok(())
        }
    }

    fn scaffolder() -> Scaffolder {
        Scaffolder::new(PathBuf::from("/opt/android-sdk"))
    }

    fn answers() -> ScriptedPrompt {
        ScriptedPrompt::new(["My App", "com.example.myapp", "secret1", "", ""])
    }

    #[tokio::test]
    async fn test_package_derived_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        scaffolder()
            .create_project(dir.path(), &mut answers(), &runner)
            .await
            .unwrap();

        assert!(dir.path().join("src/com/example/myapp").is_dir());
        assert!(dir.path().join("res/layout/activity_main.xml").is_file());
        assert!(dir.path().join("signing/storepass.txt").is_file());

        let source = std::fs::read_to_string(
            dir.path().join("src/com/example/myapp/MainActivity.java"),
        )
        .unwrap();
        assert!(source.starts_with("package com.example.myapp;"));

        let manifest =
            std::fs::read_to_string(dir.path().join("AndroidManifest.xml")).unwrap();
        assert!(manifest.contains(r#"package="com.example.myapp""#));
        assert!(manifest.contains(r#"android:label="My App""#));
    }

    #[tokio::test]
    async fn test_empty_answers_take_documented_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        scaffolder()
            .create_project(dir.path(), &mut answers(), &runner)
            .await
            .unwrap();

        let descriptor = ProjectDescriptor::load(dir.path()).unwrap();
        assert_eq!(descriptor.java_target, "1.8");
        assert_eq!(descriptor.sdk_target, "35");
        assert_eq!(descriptor.sdk_ver, "35.0.0");
        assert_eq!(descriptor.android_sdk_path, PathBuf::from("/opt/android-sdk"));
    }

    #[tokio::test]
    async fn test_keystore_generated_with_fixed_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        scaffolder()
            .create_project(dir.path(), &mut answers(), &runner)
            .await
            .unwrap();

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let keytool = &calls[0];
        assert_eq!(keytool.tool_name(), "keytool");
        let args: Vec<_> = keytool
            .arg_list()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "-genkeypair",
                "-v",
                "-keystore",
                "signing/keystore.jks",
                "-keyalg",
                "RSA",
                "-keysize",
                "2048",
                "-validity",
                "10000",
                "-alias",
                "mainkey",
                "-storepass",
                "secret1",
            ]
        );

        let stored =
            std::fs::read_to_string(dir.path().join("signing/storepass.txt")).unwrap();
        assert_eq!(stored, "secret1");
    }

    #[tokio::test]
    async fn test_second_scaffold_aborts_before_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        scaffolder()
            .create_project(dir.path(), &mut answers(), &runner)
            .await
            .unwrap();
        let first_pass = runner.call_count();

        // No scripted answers left: the guard must fire before any prompt.
        let mut exhausted = ScriptedPrompt::default();
        let err = scaffolder()
            .create_project(dir.path(), &mut exhausted, &runner)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ProjectAlreadyExists(_)));
        assert_eq!(runner.call_count(), first_pass);

        let stored =
            std::fs::read_to_string(dir.path().join("signing/storepass.txt")).unwrap();
        assert_eq!(stored, "secret1");
    }
}
