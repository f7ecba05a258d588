use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use chrono::Utc;
use toplist_core::{update, AppState, AppViewModel, Msg, ResponseOrdering};
use toplist_engine::{EngineEvents, EngineHandle};
use toplist_logging::{toplist_info, toplist_warn};

use super::browser::TerminalBrowser;
use super::config::AppConfig;
use super::effects::{engine_event_to_msg, EffectRunner};
use super::logging;
use super::ui::commands::{self, UserCommand};
use super::ui::render;
use crate::cli::Cli;

enum HostEvent {
    Engine(Msg),
    Input(String),
    InputClosed,
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(api) = cli.api {
        config.api_base = api;
    }
    logging::initialize(
        config.log_destination,
        &config.log_file,
        config.level_filter()?,
    );
    toplist_info!(
        "toplist starting against {} ({:?})",
        config.api_base,
        config.response_ordering
    );

    let (engine, events) =
        EngineHandle::new(config.fetch_settings()).context("failed to start the data engine")?;
    let (host_tx, host_rx) = mpsc::channel();
    spawn_engine_forwarder(events, host_tx.clone());
    spawn_input_reader(host_tx);

    let mut session = Session::new(config.response_ordering, engine, &cli.fragment);
    println!("{}", commands::HELP);
    session.start();
    session.pump();
    flush_output(&mut session);

    while let Ok(event) = host_rx.recv() {
        match event {
            HostEvent::Engine(msg) => session.enqueue(msg),
            HostEvent::Input(line) => match commands::parse(&line) {
                Ok(UserCommand::Quit) => break,
                Ok(command) => session.handle_command(command),
                Err(message) => session.say(message),
            },
            HostEvent::InputClosed => break,
        }
        session.pump();
        flush_output(&mut session);
    }

    toplist_info!("toplist exiting at #{}", session.browser.fragment());
    Ok(())
}

fn spawn_engine_forwarder(events: EngineEvents, host_tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if host_tx
                .send(HostEvent::Engine(engine_event_to_msg(event)))
                .is_err()
            {
                return;
            }
        }
        let _ = host_tx.send(HostEvent::Engine(Msg::Fault(
            "data engine stopped".to_string(),
        )));
    });
}

fn spawn_input_reader(host_tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if host_tx.send(HostEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    toplist_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
        let _ = host_tx.send(HostEvent::InputClosed);
    });
}

fn flush_output(session: &mut Session) {
    let mut stdout = io::stdout().lock();
    for line in session.take_output() {
        let _ = writeln!(stdout, "{line}");
    }
    let _ = write!(stdout, "#{}> ", session.browser.fragment());
    let _ = stdout.flush();
}

/// One browser tab: router state, the last rendered view, history and viewport.
struct Session {
    state: AppState,
    view: AppViewModel,
    browser: TerminalBrowser,
    runner: EffectRunner,
    pending: VecDeque<Msg>,
    output: Vec<String>,
}

impl Session {
    fn new(ordering: ResponseOrdering, engine: EngineHandle, fragment: &str) -> Self {
        let state = AppState::with_ordering(ordering);
        let view = state.view();
        Self {
            state,
            view,
            browser: TerminalBrowser::new(fragment),
            runner: EffectRunner::new(engine),
            pending: VecDeque::new(),
            output: Vec::new(),
        }
    }

    fn start(&mut self) {
        let fragment = self.browser.fragment();
        self.enqueue(Msg::Started { fragment });
    }

    fn enqueue(&mut self, msg: Msg) {
        self.pending.push_back(msg);
    }

    fn say(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Dispatches queued messages, including those raised by effects.
    fn pump(&mut self) {
        while let Some(msg) = self.pending.pop_front() {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
            let lines = render::render(&self.view, Utc::now());
            self.output.extend(lines);
        }
        self.state = state;

        let raised = self.runner.run(effects, &mut self.browser);
        self.pending.extend(raised);
        if let Some(record) = self.browser.viewport.take_restored() {
            self.say(format!("(scroll restored to y={})", record.y));
        }
    }

    fn handle_command(&mut self, command: UserCommand) {
        match command {
            UserCommand::Open(fragment) => {
                if let Some(msg) = self.browser.navigate(&fragment) {
                    self.enqueue(msg);
                }
            }
            UserCommand::Back => match self.browser.back() {
                Some(msg) => self.enqueue(msg),
                None => self.say("(no earlier history entry)"),
            },
            UserCommand::Forward => match self.browser.forward() {
                Some(msg) => self.enqueue(msg),
                None => self.say("(no later history entry)"),
            },
            UserCommand::Pick(None) => self.enqueue(Msg::LanguagePicked(None)),
            UserCommand::Pick(Some(query)) => {
                match commands::resolve_language(&self.view, &query) {
                    Some(escaped_name) => self.enqueue(Msg::LanguagePicked(Some(escaped_name))),
                    None => self.say(format!("no language matches {query:?}")),
                }
            }
            UserCommand::Page(_) | UserCommand::Prev | UserCommand::Next => {
                match commands::resolve_strip_target(&self.view, &command) {
                    Some(target) => self.enqueue(Msg::PageClicked(target)),
                    None => self.say("(that entry is not clickable)"),
                }
            }
            UserCommand::Scroll(y) => {
                self.browser.scroll(y);
                self.say(format!("(scrolled to y={y})"));
            }
            UserCommand::Help => self.say(commands::HELP),
            UserCommand::Quit => {}
        }
    }
}
