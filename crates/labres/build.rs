//! Generates man pages and shell completions for `labres` into `OUT_DIR`.
//!
//! `src/cli.rs` is included by path; it depends on clap alone.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Command, CommandFactory, ValueEnum};
use clap_complete::Shell;

#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    let mut cmd = cli::Cli::command();

    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("create man directory");
    write_manpages(&cmd, &man_dir);

    let completion_dir = out_dir.join("completions");
    fs::create_dir_all(&completion_dir).expect("create completions directory");
    for &shell in Shell::value_variants() {
        clap_complete::generate_to(shell, &mut cmd, "labres", &completion_dir)
            .unwrap_or_else(|e| panic!("{shell} completions: {e}"));
    }
}

/// One page per visible command, named `labres-<sub>-<subsub>.1`.
fn write_manpages(root: &Command, dir: &Path) {
    let mut pending = vec![root.clone()];

    while let Some(cmd) = pending.pop() {
        let name = cmd.get_name().to_owned();

        pending.extend(
            cmd.get_subcommands()
                .filter(|sub| !sub.is_hide_set())
                .map(|sub| sub.clone().name(format!("{name}-{}", sub.get_name()))),
        );

        let mut page = Vec::new();
        clap_mangen::Man::new(cmd)
            .render(&mut page)
            .unwrap_or_else(|e| panic!("render {name}.1: {e}"));
        fs::write(dir.join(format!("{name}.1")), page)
            .unwrap_or_else(|e| panic!("write {name}.1: {e}"));
    }
}
