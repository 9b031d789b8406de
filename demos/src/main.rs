// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::process::ExitCode;

use sigstark_demos::{run, DemoOptions};
use structopt::StructOpt;
use tracing::{event, Level};
#[cfg(feature = "tracing-forest")]
use tracing_forest::ForestLayer;
#[cfg(not(feature = "tracing-forest"))]
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// DEMO RUNNER
// ================================================================================================

fn main() -> ExitCode {
    // configure logging; SIGSTARK_LOG overrides the default level
    let filter = EnvFilter::try_from_env("SIGSTARK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    #[cfg(feature = "tracing-forest")]
    registry.with(ForestLayer::default()).init();

    #[cfg(not(feature = "tracing-forest"))]
    {
        let format = tracing_subscriber::fmt::layer()
            .with_level(false)
            .with_target(false)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .compact();
        registry.with(format).init();
    }

    // read command-line args
    let options = DemoOptions::from_args();

    let outcome = match run(&options) {
        Ok(outcome) => outcome,
        Err(err) => {
            event!(Level::ERROR, %err, "demo failed");
            return ExitCode::FAILURE;
        },
    };

    println!("{}", hex::encode(&outcome.proof_bytes));

    let tamper_accepted = matches!(outcome.tampered_verification, Some(Ok(())));
    if outcome.verification.is_ok() && !tamper_accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
