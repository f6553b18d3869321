use std::error::Error;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{info, LevelFilter};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tui::backend::CrosstermBackend;
use tui::layout::{Alignment, Constraint, Direction, Layout};
use tui::style::{Color, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::Terminal;

use vein_control::bsp::indicator::Indicator;
use vein_control::bsp::led::Led;
use vein_control::config::Config;
use vein_control::control::{ChannelOutput, Phase, VeinControl};
use vein_control::state::{Channel, DeviceState};

use crate::dummy_indicator::DummyIndicator;
use crate::dummy_led::DummyLed;
use crate::keyboard_pin::{Keyboard, KeyboardPin};
use crate::log_pane::LogPane;

mod dummy_indicator;
mod dummy_led;
mod keyboard_pin;
mod log_pane;

const SELECT_KEYS: &[KeyCode] = &[KeyCode::Char(' '), KeyCode::Enter];
const UP_KEYS: &[KeyCode] = &[KeyCode::Up];
const DOWN_KEYS: &[KeyCode] = &[KeyCode::Down];
const QUIT_KEYS: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q')];

const BAR_WIDTH: u32 = 40;
const RED: Color = Color::Rgb(230, 30, 30);
const ORANGE: Color = Color::Rgb(255, 140, 0);

type Backend = CrosstermBackend<Stdout>;

/// Everything the TUI shows, captured once per tick
struct View {
    profile: String,
    config: Config,
    phase: Phase,
    state: DeviceState,
    red_duty: u32,
    orange_duty: u32,
    red_indicator: bool,
    orange_indicator: bool,
    log: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let (profile, config) = select_profile(std::env::args().nth(1))?;
    let log_pane = LogPane::install(8, LevelFilter::Debug)?;

    let (keys_tx, keys_rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || read_keys(keys_tx));

    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let result = run(&mut terminal, keys_rx, log_pane, profile, config).await;

    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;
    result
}

fn select_profile(arg: Option<String>) -> Result<(String, Config), Box<dyn Error>> {
    let name = arg.unwrap_or_else(|| "vein-finder".to_string());
    match Config::profile(&name) {
        Some(config) => {
            config
                .validate()
                .map_err(|error| format!("profile '{}': {}", name, error))?;
            Ok((name, config))
        }
        None => {
            let known: Vec<&str> = Config::PROFILES.iter().map(|(name, _)| *name).collect();
            Err(format!("unknown profile '{}', expected one of: {}", name, known.join(", ")).into())
        }
    }
}

async fn run(
    terminal: &mut Terminal<Backend>,
    mut keys: UnboundedReceiver<KeyCode>,
    log_pane: &LogPane,
    profile: String,
    config: Config,
) -> Result<(), Box<dyn Error>> {
    let keyboard = Keyboard::default();
    let red_led = DummyLed::create(0);
    let orange_led = DummyLed::create(0);
    let red_indicator = DummyIndicator::create();
    let orange_indicator = DummyIndicator::create();

    let control = VeinControl::new(
        config,
        KeyboardPin::create(&keyboard, SELECT_KEYS),
        KeyboardPin::create(&keyboard, UP_KEYS),
        KeyboardPin::create(&keyboard, DOWN_KEYS),
        ChannelOutput {
            led: &red_led,
            indicator: &red_indicator,
        },
        ChannelOutput {
            led: &orange_led,
            indicator: &orange_indicator,
        },
    );

    info!("profile {}, tick {} ms", profile, config.tick_ms);
    control.start();

    let mut interval = tokio::time::interval(Duration::from_millis(config.tick_ms as u64));
    loop {
        interval.tick().await;
        while let Ok(code) = keys.try_recv() {
            if QUIT_KEYS.contains(&code) {
                return Ok(());
            }
            keyboard.on_key(code);
        }

        control.tick(config.tick_ms);

        let view = View {
            profile: profile.clone(),
            config,
            phase: control.phase(),
            state: control.state(),
            red_duty: red_led.get(),
            orange_duty: orange_led.get(),
            red_indicator: red_indicator.is_on(),
            orange_indicator: orange_indicator.is_on(),
            log: log_pane.lines(),
        };
        draw_tui(terminal, &view)?;
    }
}

/// Runs on a blocking thread until the receiving side goes away
fn read_keys(keys: UnboundedSender<KeyCode>) -> crossterm::Result<()> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            let code = match event::read()? {
                Event::Key(KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                }) => KeyCode::Esc,
                Event::Key(KeyEvent { code, .. }) => code,
                _ => continue,
            };
            if keys.send(code).is_err() {
                return Ok(());
            }
        } else if keys.is_closed() {
            return Ok(());
        }
    }
}

fn draw_tui(terminal: &mut Terminal<Backend>, view: &View) -> io::Result<()> {
    terminal.draw(|rect| {
        let size = rect.size();
        let vertical_layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(6),
                    Constraint::Min(3),
                ]
                .as_ref(),
            )
            .split(size);

        let duty_max = view.config.duty_max;
        rect.render_widget(
            duty_bar("red", view.red_duty, duty_max, RED),
            vertical_layout[0],
        );
        rect.render_widget(
            duty_bar("orange", view.orange_duty, duty_max, ORANGE),
            vertical_layout[1],
        );
        rect.render_widget(status(view), vertical_layout[2]);

        let log: Vec<Spans> = view
            .log
            .iter()
            .map(|line| Spans::from(Span::raw(line.clone())))
            .collect();
        let log_paragraph = Paragraph::new(log).block(
            Block::default()
                .title("log")
                .borders(Borders::ALL)
                .border_type(BorderType::Plain),
        );
        rect.render_widget(log_paragraph, vertical_layout[3]);
    })?;
    Ok(())
}

fn duty_bar(name: &str, duty: u32, duty_max: u32, color: Color) -> Paragraph<'static> {
    let width = (duty.min(duty_max) * BAR_WIDTH / duty_max) as usize;
    Paragraph::new(Spans::from(vec![
        Span::styled(" ".repeat(width), Style::default().bg(color)),
        Span::raw(" ".repeat(BAR_WIDTH as usize - width)),
        Span::raw(format!("  duty {:4} / {}", duty, duty_max)),
    ]))
    .block(
        Block::default()
            .title(name.to_string())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
}

fn indicator(on: bool, color: Color) -> Span<'static> {
    let bg = if on { color } else { Color::DarkGray };
    Span::styled("   ", Style::default().bg(bg))
}

fn status(view: &View) -> Paragraph<'static> {
    let phase = match view.phase {
        Phase::Booting { .. } => "booting",
        Phase::Running => "running",
    };
    let active = match view.state.active() {
        Channel::Red => "red",
        Channel::Orange => "orange",
    };
    Paragraph::new(vec![
        Spans::from(vec![
            Span::raw("indicators "),
            indicator(view.red_indicator, RED),
            Span::raw(" "),
            indicator(view.orange_indicator, ORANGE),
            Span::raw(format!("   {} ({})", phase, view.profile)),
        ]),
        Spans::from(Span::raw(format!(
            "active: {:6}  level red {} / orange {}  (range {}..={})",
            active,
            view.state.level(Channel::Red),
            view.state.level(Channel::Orange),
            view.config.min_level,
            view.config.max_level,
        ))),
        Spans::from(Span::raw("space/enter: select   up/down: brightness   q/esc: quit")),
    ])
    .alignment(Alignment::Left)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
}
