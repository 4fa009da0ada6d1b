// Copyright (c) 2026 age-passgen contributors. MIT License.
// See LICENSE for details.

//! # age-passgen
//!
//! Entry point for the `age-passgen` binary. Parses CLI arguments,
//! initializes logging, reads the secret, derives the identity with
//! `passgen-core`, and writes the key file.
//!
//! Nothing is written until the identity has been fully derived and encoded.
//! A failure at any step prints `age-passgen ERROR: ...` to stderr and exits
//! with status 1.

mod cli;
mod input;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use passgen_core::identity::{encode, EncodeOptions};
use passgen_core::reduce::ReductionError;
use passgen_core::InputMode;

use cli::PassgenCli;

fn main() -> ExitCode {
    let cli = PassgenCli::parse();
    logging::init_logging(cli.log_filter(), cli.log_format);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("age-passgen ERROR: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: PassgenCli) -> Result<()> {
    let mode = InputMode::from(cli.input_type);
    tracing::info!(
        %mode,
        level = %cli.entropy_level,
        raw_output = cli.raw_output,
        output = ?cli.output,
        "starting age-passgen"
    );

    let identity = {
        let material = input::read_material(cli.input.as_deref(), cli.trim_newline)?;
        passgen_core::generate(mode, &material, cli.entropy_level)
            .map_err(|err| explain(err, mode))?
    };

    let encoded = encode(
        &identity,
        EncodeOptions {
            verbose: !cli.raw_output,
        },
    );
    output::emit(&encoded, cli.output.as_deref())
}

/// Wrap a derivation failure, with a hint when the user can fix it from the
/// command line.
fn explain(err: passgen_core::Error, mode: InputMode) -> anyhow::Error {
    let hint = match &err {
        passgen_core::Error::Reduction(ReductionError::WeakInput { .. }) => {
            Some("choose a longer passphrase, or change --entropy-level (see --help)")
        }
        passgen_core::Error::Reduction(ReductionError::MalformedHash(_)) => {
            Some("--input-type hash expects 64 hex digits")
        }
        passgen_core::Error::Reduction(ReductionError::WrongLength { .. }) => {
            Some("--input-type raw expects exactly 32 bytes; try --trim-newline if a newline slipped in")
        }
        _ => None,
    };
    let context = format!("failed to derive identity from {mode} input");
    match hint {
        Some(hint) => anyhow::Error::new(err).context(format!("{context} ({hint})")),
        None => anyhow::Error::new(err).context(context),
    }
}
