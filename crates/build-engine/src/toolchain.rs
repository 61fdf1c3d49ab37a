//! SDK tool path resolution
//!
//! Tools live at fixed locations under the SDK root:
//! `build-tools/<sdk_ver>/<tool>` and
//! `platforms/android-<sdk_target>/android.jar`.

use std::path::PathBuf;

use droidbuild_core::ProjectDescriptor;

/// `javac` ships with the JDK and is resolved from `PATH`, not the SDK.
pub const JAVAC: &str = "javac";

/// Resolves external tool paths for one project's SDK configuration.
#[derive(Debug, Clone)]
pub struct Toolchain {
    sdk_path: PathBuf,
    sdk_ver: String,
    sdk_target: String,
}

impl Toolchain {
    pub fn from_descriptor(descriptor: &ProjectDescriptor) -> Self {
        Self {
            sdk_path: descriptor.android_sdk_path.clone(),
            sdk_ver: descriptor.sdk_ver.clone(),
            sdk_target: descriptor.sdk_target.clone(),
        }
    }

    fn build_tool(&self, name: &str, windows_ext: &str) -> PathBuf {
        let file = if cfg!(windows) {
            format!("{name}.{windows_ext}")
        } else {
            name.to_string()
        };
        self.sdk_path
            .join("build-tools")
            .join(&self.sdk_ver)
            .join(file)
    }

    /// Resource compiler and APK packer.
    pub fn aapt(&self) -> PathBuf {
        self.build_tool("aapt", "exe")
    }

    /// Dex translator.
    pub fn d8(&self) -> PathBuf {
        self.build_tool("d8", "bat")
    }

    /// APK signer.
    pub fn apksigner(&self) -> PathBuf {
        self.build_tool("apksigner", "bat")
    }

    /// Platform jar used both for resource linking and as the javac boot
    /// classpath.
    pub fn android_jar(&self) -> PathBuf {
        self.sdk_path
            .join("platforms")
            .join(format!("android-{}", self.sdk_target))
            .join("android.jar")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolchain() -> Toolchain {
        let descriptor = ProjectDescriptor::new(
            PathBuf::from("/opt/android-sdk"),
            "1.8".to_string(),
            "35".to_string(),
        );
        Toolchain::from_descriptor(&descriptor)
    }

    #[test]
    #[cfg(not(windows))]
    fn test_build_tool_layout() {
        assert_eq!(
            toolchain().aapt(),
            PathBuf::from("/opt/android-sdk/build-tools/35.0.0/aapt")
        );
        assert_eq!(
            toolchain().d8(),
            PathBuf::from("/opt/android-sdk/build-tools/35.0.0/d8")
        );
        assert_eq!(
            toolchain().apksigner(),
            PathBuf::from("/opt/android-sdk/build-tools/35.0.0/apksigner")
        );
    }

    #[test]
    fn test_platform_jar_layout() {
        assert_eq!(
            toolchain().android_jar(),
            PathBuf::from("/opt/android-sdk/platforms/android-35/android.jar")
        );
    }
}
