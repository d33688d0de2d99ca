#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch git repository plus a directory outside it for config files and checker stubs.
pub struct TestRepo {
    _tmp: TempDir,
    pub root: PathBuf,
    pub aux: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let base = tmp.path().canonicalize().expect("canonical temp dir");
        let root = base.join("zones");
        let aux = base.join("aux");
        fs::create_dir_all(&root).expect("create repo dir");
        fs::create_dir_all(&aux).expect("create aux dir");

        let repo = Self {
            _tmp: tmp,
            root,
            aux,
        };
        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.email", "hostmaster@example.com"]);
        repo.git(&["config", "user.name", "Hostmaster"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub fn git(&self, args: &[&str]) -> String {
        let output = std::process::Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .unwrap_or_else(|e| panic!("git {} failed: {e}", args.join(" ")));
        assert!(
            output.status.success(),
            "git {} failed:\nstdout: {}\nstderr: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    pub fn write(&self, path: &str, content: &str) {
        let path = self.root.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, content).expect("write file");
    }

    pub fn stage(&self, path: &str, content: &str) {
        self.write(path, content);
        self.git(&["add", path]);
    }

    pub fn commit(&self, message: &str) {
        self.git(&["commit", "-q", "-m", message]);
    }

    /// An executable shell script standing in for the external zone checker.
    pub fn checker_stub(&self, body: &str) -> PathBuf {
        let path = self.aux.join("named-checkzone");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write checker stub");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
        path
    }

    /// A config file pointing at `checker` and forcing `context`.
    pub fn config(&self, checker: &Path, context: &str) -> PathBuf {
        let path = self.aux.join("zonegate.json");
        let config = serde_json::json!({
            "checkzone": checker,
            "context": context,
        });
        fs::write(&path, config.to_string()).expect("write config");
        path
    }

    pub fn zonegate(&self, config: &Path) -> Command {
        let mut cmd = Command::cargo_bin("zonegate").expect("zonegate binary");
        cmd.current_dir(&self.root).arg(config);
        cmd
    }
}

pub fn zone(name: &str, serial: u64, origin: &str) -> String {
    format!(
        "$TTL 3600\n\
         $ORIGIN {origin}\n\
         @ 3600 IN NS ns1\n\
         {name}. IN SOA ns1.{name}. hostmaster.{name}. (\n\
         \x20   {serial} ; serial\n\
         \x20   86400 7200 3600000 172800 )\n\
         ns1 IN A 192.0.2.53\n"
    )
}

/// A serial stamped with today's date and the given counter.
pub fn todays_serial(counter: u64) -> u64 {
    let date = zonegate::zone::serial::today();
    let stamp = u64::from(date.year().unsigned_abs()) * 10_000
        + u64::from(u8::from(date.month())) * 100
        + u64::from(date.day());
    stamp * 100 + counter
}
