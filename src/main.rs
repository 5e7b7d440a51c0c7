use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use typedex::action::Action;
use typedex::api::{self, PokeApi};
use typedex::config::Config;
use typedex::effect::Effect;
use typedex::logging;
use typedex::reducer::reducer;
use typedex::state::AppState;
use typedex::tasks;
use typedex::ui::{TypedexComponentId, TypedexContext, TypedexUi};

#[derive(Parser, Debug)]
#[command(name = "typedex")]
#[command(about = "Browse pokemon by type")]
struct Args {
    #[command(flatten)]
    config: Config,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        config,
        debug: debug_args,
    } = Args::parse();

    let _log_guard = logging::init(&config.log_dir())?;
    tracing::info!(api_base = %config.api_base, category = %config.category, "starting");

    let client = PokeApi::new(config.api_base.clone(), config.request_timeout())
        .map_err(|err| io::Error::other(format!("http client: {err}")))?;
    api::install(client);

    let debug = DebugSession::new(debug_args);
    let category = config.category;
    let page_size = config.page_size();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(category, page_size))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("exiting");
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(TypedexUi::new()));
    let mut bus: EventBus<AppState, Action, TypedexComponentId, TypedexContext> = EventBus::new();
    let keybindings: Keybindings<TypedexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(TypedexComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(TypedexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_picker = Rc::clone(&ui);
    bus.register(TypedexComponentId::Picker, move |event, state| {
        ui_picker
            .borrow_mut()
            .handle_picker_event(&event.kind, state)
    });

    bus.register_global(|event, state| {
        let typing = state.search.active || state.picker.open;
        match event.kind {
            EventKind::Resize(width, height) => {
                HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
            }
            EventKind::Key(key) if !typing => match key.code {
                crossterm::event::KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
                crossterm::event::KeyCode::Char('/') => {
                    HandlerResponse::action(Action::SearchStart)
                }
                crossterm::event::KeyCode::Char('[') => {
                    HandlerResponse::action(Action::CategoryPrev)
                }
                crossterm::event::KeyCode::Char(']') => {
                    HandlerResponse::action(Action::CategoryNext)
                }
                _ => HandlerResponse::ignored(),
            },
            _ => HandlerResponse::ignored(),
        }
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadList {
            category,
            generation,
        } => {
            // One key for every list fetch: a newer fetch replaces the older task.
            ctx.tasks().spawn(
                TaskKey::new("list"),
                tasks::load_list(api::shared(), category, generation),
            );
        }
        Effect::LoadCard { name, url } => {
            // Only the card under the cursor is in flight.
            ctx.tasks().spawn(
                TaskKey::new("card"),
                tasks::load_card(api::shared(), name, url),
            );
        }
    }
}
