//! Fixed file templates, parameterized only by project and package name.

/// Android manifest declaring a single exported launcher activity.
pub fn manifest_xml(package: &str, project_name: &str) -> String {
    format!(
        r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="{package}">
    <application
        android:allowBackup="true"
        android:label="{project_name}">

        <activity android:name=".MainActivity"
            android:exported="true">
            <intent-filter>
                <action android:name="android.intent.action.MAIN" />
                <category android:name="android.intent.category.LAUNCHER" />
            </intent-filter>
        </activity>
    </application>
</manifest>
"#
    )
}

/// Default activity source, in the project's package.
pub fn main_activity_java(package: &str) -> String {
    format!(
        r#"package {package};

import android.app.Activity;
import android.os.Bundle;

public class MainActivity extends Activity {{
    @Override
    protected void onCreate(Bundle savedInstanceState) {{
        super.onCreate(savedInstanceState);
        setContentView(R.layout.activity_main);
    }}
}}
"#
    )
}

/// Default layout: a vertical LinearLayout with one greeting label.
pub const ACTIVITY_MAIN_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<LinearLayout xmlns:android="http://schemas.android.com/apk/res/android"
    android:layout_width="match_parent"
    android:layout_height="match_parent"
    android:orientation="vertical">

    <TextView
        android:id="@+id/textView"
        android:layout_width="wrap_content"
        android:layout_height="wrap_content"
        android:text="Hello, World!" />
</LinearLayout>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_embeds_package_and_label() {
        let manifest = manifest_xml("com.example.app", "My App");
        assert!(manifest.contains(r#"package="com.example.app""#));
        assert!(manifest.contains(r#"android:label="My App""#));
    }

    #[test]
    fn test_activity_package_declaration_is_verbatim() {
        let source = main_activity_java("com.example.app");
        assert!(source.starts_with("package com.example.app;\n"));
        assert!(source.contains("class MainActivity extends Activity"));
    }
}
