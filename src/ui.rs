use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{
    Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, SelectList,
    SelectListBehavior, SelectListProps, SelectListStyle, SelectionStyle, StatusBar,
    StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use crate::action::Action;
use crate::category::Category;
use crate::pipeline::FetchState;
use crate::state::{AppState, CardDetail};
use crate::view::ViewState;

const BG_BASE: Color = Color::Rgb(12, 18, 28);
const BG_PANEL: Color = Color::Rgb(20, 32, 46);
const BG_MODAL: Color = Color::Rgb(35, 35, 45);
const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
const ACCENT_RED: Color = Color::Rgb(224, 96, 96);

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TypedexComponentId {
    List,
    Search,
    Picker,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedexContext {
    List,
    Search,
    Picker,
}

impl EventRoutingState<TypedexComponentId, TypedexContext> for AppState {
    fn focused(&self) -> Option<TypedexComponentId> {
        self.modal().or(Some(TypedexComponentId::List))
    }

    fn modal(&self) -> Option<TypedexComponentId> {
        if self.picker.open {
            Some(TypedexComponentId::Picker)
        } else if self.search.active {
            Some(TypedexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: TypedexComponentId) -> TypedexContext {
        match id {
            TypedexComponentId::List => TypedexContext::List,
            TypedexComponentId::Search => TypedexContext::Search,
            TypedexComponentId::Picker => TypedexContext::Picker,
        }
    }

    fn default_context(&self) -> TypedexContext {
        TypedexContext::List
    }
}

/// Screen regions from the last draw, used for mouse routing.
#[derive(Clone, Copy, Debug, Default)]
pub struct UiAreas {
    pub header: Rect,
    pub list: Rect,
    pub picker: Option<Rect>,
}

pub struct TypedexUi {
    item_list: SelectList,
    picker_list: SelectList,
    picker_modal: Modal,
    status_bar: StatusBar,
}

impl Default for TypedexUi {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedexUi {
    pub fn new() -> Self {
        Self {
            item_list: SelectList::new(),
            picker_list: SelectList::new(),
            picker_modal: Modal::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<TypedexComponentId>,
    ) {
        let areas = self.draw(frame, area, state);
        event_ctx.set_component_area(TypedexComponentId::List, areas.list);
        event_ctx.set_component_area(TypedexComponentId::Search, areas.header);
        // A closed picker keeps an empty area so clicks never reach it.
        event_ctx.set_component_area(
            TypedexComponentId::Picker,
            areas.picker.unwrap_or_default(),
        );
    }

    /// Draws the whole screen without touching event routing.
    pub fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) -> UiAreas {
        let base = Block::default().style(Style::default().bg(BG_BASE));
        frame.render_widget(base, area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        let view = state.view();
        render_header(frame, layout[0], state, &view);
        let list_area = render_body(frame, layout[1], state, &view, &mut self.item_list);
        render_footer(frame, layout[2], state, &mut self.status_bar);

        let picker = if state.picker.open {
            Some(render_picker(
                frame,
                area,
                state,
                &mut self.picker_list,
                &mut self.picker_modal,
            ))
        } else {
            None
        };

        UiAreas {
            header: layout[0],
            list: list_area,
            picker,
        }
    }

    pub fn handle_list_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_list_event(event, state)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_search_event(event, state)
    }

    pub fn handle_picker_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_picker_event(event, state)
    }
}

pub fn handle_list_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            KeyCode::Char('j') | KeyCode::Down => vec![Action::SelectionMove(1)],
            KeyCode::Char('k') | KeyCode::Up => vec![Action::SelectionMove(-1)],
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => vec![Action::PageNext],
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => vec![Action::PagePrev],
            KeyCode::Char('t') => vec![Action::PickerOpen],
            KeyCode::Char('r') => vec![Action::ListRefresh],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

pub fn handle_search_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            KeyCode::Esc => vec![Action::SearchCancel],
            KeyCode::Enter => vec![Action::SearchSubmit],
            KeyCode::Backspace => vec![Action::SearchBackspace],
            KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    // The search box owns the keyboard while it is open.
    HandlerResponse {
        actions,
        consumed: true,
        needs_render: false,
    }
}

pub fn handle_picker_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            KeyCode::Char('j') | KeyCode::Down => vec![Action::PickerMove(1)],
            KeyCode::Char('k') | KeyCode::Up => vec![Action::PickerMove(-1)],
            KeyCode::Enter => vec![Action::PickerConfirm],
            KeyCode::Esc | KeyCode::Char('t') => vec![Action::PickerClose],
            _ => vec![],
        },
        _ => vec![],
    };
    HandlerResponse {
        actions,
        consumed: true,
        needs_render: false,
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, view: &ViewState) {
    let search = if state.search.active {
        format!("/{}_", state.search.query)
    } else if state.search.query.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", state.search.query)
    };
    let header = Line::from(vec![
        Span::raw("Type: "),
        Span::styled(state.category.label(), Style::default().fg(ACCENT_GOLD)),
        Span::raw("  |  Search: "),
        Span::styled(search, Style::default().fg(ACCENT_TEAL)),
        Span::raw("  |  Page: "),
        Span::styled(
            format!("{}/{}", view.current_page, view.total_pages.max(1)),
            Style::default().fg(ACCENT_GOLD),
        ),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("TYPEDEX")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    frame.render_widget(Paragraph::new(header).block(block), area);
}

fn render_body(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    view: &ViewState,
    item_list: &mut SelectList,
) -> Rect {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_list(frame, layout[0], state, view, item_list);
    render_card(frame, layout[1], state);
    layout[0]
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    view: &ViewState,
    item_list: &mut SelectList,
) {
    let title = format!("POKEMON ({})", view.filtered_count);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(ACCENT_TEAL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(notice) = list_notice(state, view) {
        let paragraph = Paragraph::new(notice).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
        return;
    }

    let items = page_items(view);
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.selected_index.min(items.len().saturating_sub(1)),
        is_focused: !state.search.active && !state.picker.open,
        style: list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: false,
            wrap_navigation: false,
        },
        on_select: Action::ItemSelect,
        render_item: &|item| item.clone(),
    };
    item_list.render(frame, inner, props);
}

/// Loading, failure and empty results replace the list entirely.
fn list_notice(state: &AppState, view: &ViewState) -> Option<Text<'static>> {
    match state.fetch_state() {
        FetchState::Loading => Some(Text::styled(
            format!("Loading {}...", state.category.label()),
            Style::default().fg(ACCENT_GOLD),
        )),
        FetchState::Failed(error) => Some(Text::from(vec![
            Line::styled(
                format!("Error: {error}"),
                Style::default().fg(ACCENT_RED),
            ),
            Line::styled("Press r to retry", Style::default().fg(TEXT_DIM)),
        ])),
        FetchState::Ready(_) if view.is_empty() => Some(Text::styled(
            "No results",
            Style::default().fg(TEXT_DIM),
        )),
        FetchState::Ready(_) => None,
    }
}

fn page_items(view: &ViewState) -> Vec<Line<'static>> {
    view.visible_items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            Line::from(format!(
                "{:>4} {}",
                view.first_index + idx + 1,
                format_name(&item.name)
            ))
        })
        .collect()
}

fn render_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("CARD")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    let paragraph = Paragraph::new(card_text(state))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn card_text(state: &AppState) -> Text<'static> {
    let Some(item) = state.selected_item() else {
        return Text::styled("Select a pokemon", Style::default().fg(TEXT_DIM));
    };
    let title = Line::styled(
        format_name(&item.name),
        Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
    );
    let Some(card) = state.cards.get(&item.name) else {
        let status = if state.card_loading.as_deref() == Some(item.name.as_str()) {
            "Loading card..."
        } else {
            "No card data"
        };
        return Text::from(vec![
            title,
            Line::styled(status, Style::default().fg(TEXT_DIM)),
        ]);
    };

    let mut lines = vec![title, Line::from("")];
    lines.push(Line::from(vec![
        Span::raw("Type: "),
        Span::styled(card_type(card, state.category), Style::default().fg(ACCENT_GOLD)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(render_stat("HP", card.hp)));
    lines.push(Line::from(render_stat("ATK", card.attack)));
    lines.push(Line::from(render_stat("DEF", card.defense)));
    if let Some(url) = card.sprite_url.as_ref() {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("Sprite: {url}"),
            Style::default().fg(TEXT_DIM),
        ));
    }
    Text::from(lines)
}

/// The card shows the pokemon's own primary type; the queried type is only a
/// fallback when the detail lacks one.
fn card_type(card: &CardDetail, category: Category) -> String {
    match (&card.primary_type, category) {
        (Some(name), _) => name.to_ascii_uppercase(),
        (None, Category::Type(kind)) => kind.slug().to_ascii_uppercase(),
        (None, Category::All) => "?".to_string(),
    }
}

fn render_picker(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    picker_list: &mut SelectList,
    picker_modal: &mut Modal,
) -> Rect {
    let modal_area = centered_rect(40, 16, area);
    let items: Vec<Line<'static>> = Category::options()
        .into_iter()
        .map(|category| {
            let marker = if category == state.category { "*" } else { " " };
            Line::from(format!("{marker} {}", category.label()))
        })
        .collect();

    let mut render_content = |frame: &mut Frame, content_area: Rect| {
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.picker.index.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: list_style(),
            behavior: SelectListBehavior::default(),
            on_select: Action::PickerSelect,
            render_item: &|item| item.clone(),
        };
        picker_list.render(frame, content_area, props);
    };

    picker_modal.render(
        frame,
        area,
        ModalProps {
            is_open: true,
            is_focused: true,
            area: modal_area,
            style: ModalStyle {
                base: BaseStyle {
                    bg: Some(BG_MODAL),
                    padding: Padding::all(1),
                    border: None,
                    fg: Some(TEXT_MAIN),
                },
                ..Default::default()
            },
            behavior: ModalBehavior::default(),
            on_close: || Action::PickerClose,
            render_content: &mut render_content,
        },
    );
    modal_area
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = state.message.clone().unwrap_or_else(|| {
        if state.fetch_state().is_loading() {
            "Loading list...".to_string()
        } else if state.card_loading.is_some() {
            "Loading card...".to_string()
        } else {
            "".to_string()
        }
    });
    let hints = status_hints(state);
    let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&hints).with_separator("  "),
        center: StatusBarSection::empty(),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
    }
    if state.picker.open {
        return vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("Enter", "Choose"),
            StatusBarHint::new("Esc", "Close"),
        ];
    }
    vec![
        StatusBarHint::new("j/k", "Move"),
        StatusBarHint::new("n/p", "Page"),
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("t", "Type"),
        StatusBarHint::new("[ ]", "Cycle"),
        StatusBarHint::new("r", "Refresh"),
        StatusBarHint::new("q", "Quit"),
    ]
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => "".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_stat(label: &str, value: u16) -> String {
    let bar_len = (value as usize / 10).clamp(1, 20);
    let bar = "#".repeat(bar_len);
    format!("{label:>4} {value:>3} {bar}")
}
