//! `correlate`: run a stream of events through the alert pipeline.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tabled::Tabled;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use satsignal_core::{
    ActionExecutor, AlertAction, AlertModel, AlertPipeline, AlertRecord, Correlator, DomainEvent,
    EventBus, InMemoryWalletService, ModelView, PaymentUri, Subscriber, UiEvent, WalletSummary,
};

use crate::cli::{CorrelateArgs, GlobalOpts};
use crate::config::{self, Config, Presentation};
use crate::error::CliError;
use crate::output;

// ── Notification log ────────────────────────────────────────────────

/// View half of the alert pairing: remembers every UI notification.
#[derive(Default)]
struct NotificationLog(Mutex<Vec<UiEvent>>);

impl NotificationLog {
    fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn since(&self, mark: usize) -> Vec<UiEvent> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(mark..)
            .map(<[UiEvent]>::to_vec)
            .unwrap_or_default()
    }
}

impl Subscriber<UiEvent> for NotificationLog {
    fn on_event(&self, event: &UiEvent) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

fn describe(event: &UiEvent) -> String {
    match event {
        UiEvent::ScreenRequested(request) => format!("screen:{}", request.kind()),
        other => other.name().to_owned(),
    }
}

// ── Output ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CorrelatedAlert {
    line: usize,
    event: &'static str,
    alert: AlertRecord,
    /// Where the transaction behind the alert can be looked up.
    #[serde(skip_serializing_if = "Option::is_none")]
    lookup: Option<String>,
    executed: bool,
    /// UI notifications published for this alert, in order.
    notifications: Vec<String>,
}

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Notifications")]
    notifications: String,
}

impl AlertRow {
    fn new(a: &CorrelatedAlert, color: bool) -> Self {
        let action = a.alert.action().map_or("-", AlertAction::name);
        Self {
            line: a.line,
            event: a.event.into(),
            severity: output::severity_label(a.alert.severity(), color),
            message: a.alert.message().into(),
            action: if a.executed {
                format!("{action} (run)")
            } else {
                action.into()
            },
            notifications: a.notifications.join(", "),
        }
    }
}

// ── Input ───────────────────────────────────────────────────────────

/// Decode one input line. Blank lines and `#` comments yield `None`.
fn parse_line(line_no: usize, line: &str) -> Result<Option<DomainEvent>, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let invalid = |reason: String| CliError::InvalidEvent {
        line: line_no,
        reason,
    };

    if trimmed
        .get(..8)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("bitcoin:"))
    {
        let uri = PaymentUri::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        return Ok(Some(DomainEvent::PaymentUri(uri)));
    }

    DomainEvent::from_json(trimmed)
        .map(Some)
        .map_err(|e| invalid(e.to_string()))
}

// ── Session ─────────────────────────────────────────────────────────

struct Session {
    pipeline: AlertPipeline,
    executor: ActionExecutor,
    wallet: Arc<InMemoryWalletService>,
    alerts: ModelView<AlertModel, NotificationLog>,
    accept: bool,
}

impl Session {
    fn new(cfg: &Config, args: &CorrelateArgs) -> Self {
        let catalog = Arc::new(cfg.catalog());
        let bus = EventBus::<UiEvent>::new();
        let alerts = ModelView::new(AlertModel::new(), NotificationLog::default(), &bus);

        let wallet = Arc::new(InMemoryWalletService::new());
        if args.wallet_open || cfg.wallet.open {
            let label = args
                .wallet_label
                .clone()
                .unwrap_or_else(|| cfg.wallet.label.clone());
            wallet.open_wallet(WalletSummary::new(label));
        }

        let executor = ActionExecutor::new(wallet.clone(), catalog.clone(), bus.clone());
        let pipeline = AlertPipeline::new(Correlator::new(catalog), bus);

        Self {
            pipeline,
            executor,
            wallet,
            alerts,
            accept: args.accept || cfg.defaults.auto_accept,
        }
    }

    fn process(
        &self,
        line: usize,
        event: &DomainEvent,
    ) -> Result<Option<CorrelatedAlert>, CliError> {
        let mark = self.alerts.view().len();
        let Some(alert) = self.pipeline.handle(event)? else {
            debug!(line, event = event.name(), "no alert");
            return Ok(None);
        };

        let executed = match alert.action() {
            Some(action) if self.accept => {
                self.executor.execute(action)?;
                true
            }
            _ => false,
        };

        let notifications = self.alerts.view().since(mark).iter().map(describe).collect();
        let lookup = match event {
            DomainEvent::TransactionSeen(tx) => Some(tx.lookup_uri()),
            DomainEvent::PaymentUri(_)
            | DomainEvent::PaymentSession(_)
            | DomainEvent::HardwareWallet(_) => None,
        };
        Ok(Some(CorrelatedAlert {
            line,
            event: event.name(),
            alert,
            lookup,
            executed,
            notifications,
        }))
    }

    async fn run<R>(&self, reader: R) -> Result<Vec<CorrelatedAlert>, CliError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut line_no = 0;
        let mut results = Vec::new();
        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            let Some(event) = parse_line(line_no, &line)? else {
                continue;
            };
            if let Some(result) = self.process(line_no, &event)? {
                results.push(result);
            }
        }
        info!(lines = line_no, alerts = results.len(), "input exhausted");
        Ok(results)
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: CorrelateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let presentation = Presentation::resolve(global, &cfg);
    let session = Session::new(&cfg, &args);

    let results = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            session.run(BufReader::new(file)).await?
        }
        None => session.run(BufReader::new(tokio::io::stdin())).await?,
    };

    let out = output::render_list(
        presentation.output,
        &results,
        |a| AlertRow::new(a, presentation.color),
        |a| a.alert.message().to_owned(),
    )?;
    output::print_output(&out, presentation.quiet);

    if !presentation.quiet {
        let executed = results.iter().filter(|a| a.executed).count();
        eprintln!(
            "{} alert(s) raised, {executed} action(s) run, {} payment request(s) stored",
            results.len(),
            session.wallet.payment_request_count(),
        );
        if let Some(current) = session.alerts.model().current() {
            eprintln!("Showing: {}", current.message());
        }
    }
    Ok(())
}
