//! `uri`: decode one payment URI and show the alert it would raise.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::Serialize;

use satsignal_core::{AlertRecord, Correlator, PaymentUri};

use crate::cli::{GlobalOpts, UriArgs};
use crate::config::{self, Presentation};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct UriReport {
    uri: PaymentUri,
    alert: Option<AlertRecord>,
}

fn detail(report: &UriReport, color: bool) -> String {
    let uri = &report.uri;
    let or_dash = |v: Option<&str>| v.unwrap_or("-").to_owned();

    let mut out = String::new();
    let _ = writeln!(out, "Address:  {}", or_dash(uri.address.as_deref()));
    let _ = writeln!(
        out,
        "Amount:   {}",
        uri.amount.map_or_else(|| "-".into(), |a| a.to_string())
    );
    let _ = writeln!(out, "Label:    {}", or_dash(uri.label.as_deref()));
    let _ = writeln!(out, "Message:  {}", or_dash(uri.message.as_deref()));
    let _ = writeln!(
        out,
        "Request:  {}",
        or_dash(uri.payment_request_url.as_ref().map(|u| u.as_str()))
    );
    match &report.alert {
        Some(alert) => {
            let _ = write!(
                out,
                "Alert:    [{}] {}",
                output::severity_label(alert.severity(), color),
                alert.message()
            );
        }
        None => {
            let _ = write!(out, "Alert:    none (no destination address)");
        }
    }
    out
}

pub fn handle(args: &UriArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let presentation = Presentation::resolve(global, &cfg);

    let uri = PaymentUri::parse(&args.uri)?;
    let alert = Correlator::new(Arc::new(cfg.catalog())).from_incoming_payment_uri(&uri);
    let report = UriReport { uri, alert };

    let out = output::render_single(
        presentation.output,
        &report,
        |r| detail(r, presentation.color),
        |r| r.alert.as_ref().map(|a| a.message().to_owned()).unwrap_or_default(),
    )?;
    output::print_output(&out, presentation.quiet);
    Ok(())
}
