#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CLEAN_TABLE: &str = r#"# Fixture

- `{C795D2FE-7776-11D8-9070-00065B840D9C}`: CLSID MSDDS Diagram Control 80
- `{77D2C902-7779-11D8-9070-00065B840D9C}`: IID IDdsPolyline

```reg
[HKEY_CLASSES_ROOT\MSDDS.Diagram.080\CLSID]
@="{C795D2FE-7776-11D8-9070-00065B840D9C}"

[HKEY_CLASSES_ROOT\CLSID\{C795D2FE-7776-11D8-9070-00065B840D9C}\ProgID]
@="MSDDS.Diagram.080"
```
"#;

pub const TANGLED_TABLE: &str = r#"# Fixture

- `{77D2C902-7779-11D8-9070-00065B840D9C}`: IID IDdsPolyline
- `{B0406340-B0C5-11D0-89A9-00A0C9054129}`: CLSID Microsoft DT Diagram Surface 2

~~~registry
[HKCR\Wrong.Kind\CLSID]
@="{77D2C902-7779-11D8-9070-00065B840D9C}"

[HKCR\Loop.A\CurVer]
@="Loop.B"

[HKCR\Loop.B\CurVer]
@="Loop.A"

[HKLM\SOFTWARE\Classes\MSDTDDS.2\CLSID]
@="{B0406340-B0C5-11D0-89A9-00A0C9054129}"
~~~
"#;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub clean_table: PathBuf,
    pub tangled_table: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let clean_table = tmp.path().join("clean.md");
        fs::write(&clean_table, CLEAN_TABLE).expect("write fixture table");

        let tangled_table = tmp.path().join("tangled.md");
        fs::write(&tangled_table, TANGLED_TABLE).expect("write fixture table");

        Self {
            _tmp: tmp,
            home,
            clean_table,
            tangled_table,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ddsref");
        cmd.env("HOME", &self.home).env_remove("RUST_LOG");
        cmd
    }

    pub fn write_config(&self, toml: &str) {
        let dir = self.home.join(".config/ddsref");
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join("config.toml"), toml).expect("write config");
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.home.join(name);
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        self.run_json_code(args, 0)
    }

    pub fn run_json_code(&self, args: &[&str], code: i32) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .code(code)
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

pub fn path_str(p: &Path) -> &str {
    p.to_str().expect("path utf8")
}
