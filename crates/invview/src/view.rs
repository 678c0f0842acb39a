#![forbid(unsafe_code)]

//! Rendering of [`AppModel`] into a frame.
//!
//! Layout, top to bottom: banner, search card, filter chips (and tabs in the
//! profile variant), then the body: item grid, profile summary, placeholder,
//! or the empty state. Notifications float at the top-right and a key hint
//! sits on the last row.

use invview_core::geometry::Rect;
use invview_render::Style;
use invview_render::frame::Frame;
use invview_render::text::{display_width, ellipsize, grapheme_width};
use unicode_segmentation::UnicodeSegmentation;

use crate::app::AppModel;
use crate::catalog::FILTERS;
use crate::item::Item;
use crate::notify::{NoticeKind, ToastStack};
use crate::profile::{Profile, format_count};
use crate::state::{Focus, Tab, Variant, ViewState};
use crate::theme::{self, palette, spacing};

const MAX_CONTENT_WIDTH: u16 = 100;
const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: u16 = 6;
const SEARCH_HEIGHT: u16 = 3;
const SEARCH_BUTTON: &str = " Search ";
const TOAST_WIDTH: u16 = 46;
const TOAST_HEIGHT: u16 = 4;

pub const EMPTY_TITLE: &str = "Start searching";
pub const EMPTY_HINT: &str = "Enter a player username to see their inventory";
pub const NO_ITEMS: &str = "No items found in this category";
pub const PLACEHOLDER: &str = "Enter a player username...";

pub fn render(app: &AppModel, frame: &mut Frame) {
    let full = frame.bounds();
    frame.fill(full, theme::page());
    if full.is_empty() {
        return;
    }

    let state = app.state();
    let content = full
        .inset_xy(spacing::SM, spacing::XS)
        .centered_h(MAX_CONTENT_WIDTH);
    let (body, footer) = split_bottom(content, 1);

    let (banner, rest) = body.split_top(2);
    render_banner(frame, banner, state.variant);
    let (_, rest) = rest.split_top(spacing::SECTION_GAP);

    let (search, rest) = rest.split_top(SEARCH_HEIGHT);
    render_search(frame, search, app);
    let (_, mut rest) = rest.split_top(spacing::SECTION_GAP);

    if let Some(results) = &state.results {
        if state.shows_grid() {
            let (chips, after) = rest.split_top(1);
            render_filters(frame, chips, state);
            rest = after;
        }
        if state.has_tabs() {
            let (tabs, after) = rest.split_top(1);
            render_tabs(frame, tabs, state);
            rest = after;
        }
        let (_, body) = rest.split_top(spacing::SECTION_GAP);

        match &results.profile {
            Some(profile) if !state.shows_grid() => render_profile(frame, body, profile),
            _ => render_grid(frame, body, &state.visible_items()),
        }
    } else if state.loading {
        let line = format!("{} Loading inventory…", app.spinner_frame());
        print_centered(frame, rest.split_top(1).0, &line, theme::muted());
    } else {
        render_empty(frame, rest);
    }

    render_footer(frame, footer, state);
    render_toasts(frame, full, app.toasts());
}

fn split_bottom(area: Rect, rows: u16) -> (Rect, Rect) {
    let rows = rows.min(area.height);
    area.split_top(area.height - rows)
}

fn print_centered(frame: &mut Frame, row: Rect, text: &str, style: Style) {
    if row.is_empty() {
        return;
    }
    let text = ellipsize(text, row.width as usize);
    let w = display_width(&text) as u16;
    let x = row.x + (row.width.saturating_sub(w)) / 2;
    frame.print(x, row.y, &text, style, row.right());
}

fn render_banner(frame: &mut Frame, area: Rect, variant: Variant) {
    let (title_row, sub_row) = area.split_top(1);
    let title = match variant {
        Variant::Inventory => "✦ Player Inventory ✦",
        Variant::Profile => "✦ Player Profile ✦",
    };
    print_centered(frame, title_row, title, theme::title());
    print_centered(
        frame,
        sub_row,
        "Look up any player and browse their collection",
        theme::muted(),
    );
}

fn render_search(frame: &mut Frame, area: Rect, app: &AppModel) {
    if area.height < SEARCH_HEIGHT {
        return;
    }
    let state = app.state();
    let focused = state.focus == Focus::Search;
    frame.fill(area, theme::surface());
    let ring = if focused {
        theme::focus_ring()
    } else {
        theme::surface_border()
    };
    frame.border(area, ring);

    let inner = area.inset_xy(spacing::XS, spacing::XS);
    let button = if state.loading {
        format!(" {} Searching ", app.spinner_frame())
    } else {
        SEARCH_BUTTON.to_owned()
    };
    let button_w = display_width(&button) as u16;
    let field_right = inner.right().saturating_sub(button_w + spacing::XS);
    let button_style = if state.loading {
        theme::accent_fill().dim()
    } else {
        theme::accent_fill()
    };
    frame.print(field_right + spacing::XS, inner.y, &button, button_style, inner.right());

    let field_x = frame.print(inner.x, inner.y, "⌕ ", theme::highlight(), field_right);
    let field_w = usize::from(field_right.saturating_sub(field_x));
    if field_w == 0 {
        return;
    }
    let text = state.input.text();
    let cursor_col = if text.is_empty() {
        frame.print(field_x, inner.y, PLACEHOLDER, theme::faint(), field_right);
        0
    } else {
        let (start, pad, cursor_col) =
            field_window(text, display_width(state.input.before_cursor()), field_w);
        let x = field_x.saturating_add(u16::try_from(pad).unwrap_or(u16::MAX));
        frame.print(x, inner.y, &text[start..], theme::strong(), field_right);
        cursor_col
    };
    if focused {
        let cursor_x = u16::try_from(cursor_col)
            .ok()
            .and_then(|col| field_x.checked_add(col))
            .filter(|&x| x < field_right);
        frame.set_cursor(cursor_x.map(|x| (x, inner.y)));
    }
}

/// Scroll a single-line field `width` cells wide so the cursor stays in
/// view. Returns the byte offset to draw `text` from, the blank cells before
/// it (when a wide grapheme straddles the left edge), and the cursor column.
fn field_window(text: &str, cursor_col: usize, width: usize) -> (usize, usize, usize) {
    let scroll = (cursor_col + 1).saturating_sub(width);
    let mut x = 0;
    for (i, g) in text.grapheme_indices(true) {
        if x >= scroll {
            return (i, x - scroll, cursor_col - scroll);
        }
        x += grapheme_width(g);
    }
    (text.len(), x.saturating_sub(scroll), cursor_col - scroll)
}

fn focus_marker(frame: &mut Frame, area: Rect, focused: bool) -> u16 {
    let marker = if focused { "▸ " } else { "  " };
    frame.print(area.x, area.y, marker, theme::focus_ring(), area.right())
}

fn render_filters(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut x = focus_marker(frame, area, state.focus == Focus::Filters);
    for filter in FILTERS {
        let label = format!(" {} {} ", filter.icon, filter.label);
        let style = if filter.id == state.filter {
            theme::accent_fill()
        } else {
            theme::chip()
        };
        x = frame.print(x, area.y, &label, style, area.right());
        x = x.saturating_add(spacing::XS);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut x = focus_marker(frame, area, state.focus == Focus::Tabs);
    for tab in [Tab::Profile, Tab::Inventory] {
        let label = format!(" {} ", tab.label());
        let style = if tab == state.tab {
            theme::accent_fill()
        } else {
            theme::chip()
        };
        x = frame.print(x, area.y, &label, style, area.right());
        x = x.saturating_add(spacing::XS);
    }
}

fn render_grid(frame: &mut Frame, area: Rect, items: &[&Item]) {
    if items.is_empty() {
        print_centered(frame, area.split_top(2).1.split_top(1).0, NO_ITEMS, theme::faint());
        return;
    }
    let columns = ((area.width + spacing::CARD_GAP) / (CARD_WIDTH + spacing::CARD_GAP)).max(1);
    let card_w = CARD_WIDTH.min(area.width);
    for (i, item) in items.iter().enumerate() {
        let col = i as u16 % columns;
        let row = i as u16 / columns;
        let x = area.x + col * (CARD_WIDTH + spacing::CARD_GAP);
        let y = area.y + row * (CARD_HEIGHT + spacing::XS);
        if y + CARD_HEIGHT > area.bottom() {
            break;
        }
        render_card(frame, Rect::new(x, y, card_w, CARD_HEIGHT), item);
    }
}

fn render_card(frame: &mut Frame, area: Rect, item: &Item) {
    let rarity = item.rarity().style();
    frame.fill(area, theme::surface());
    frame.border(area, rarity.frame());

    let inner = area.inset_xy(spacing::XS + 1, spacing::XS);
    let right = inner.right();
    let badge = format!(" {} ", item.rarity().tag());
    frame.print(inner.x, inner.y, &badge, rarity.badge(), right);

    let name_x = frame.print(inner.x, inner.y + 1, item.thumbnail(), Style::new(), right);
    let name_x = name_x + 1;
    let name = ellipsize(item.name(), right.saturating_sub(name_x) as usize);
    frame.print(name_x, inner.y + 1, &name, theme::strong(), right);

    frame.print(inner.x, inner.y + 2, item.category(), theme::subtle(), right);
    if let Some(price) = item.price_label() {
        frame.print(inner.x, inner.y + 3, &price, theme::price(), right);
    }
}

fn render_profile(frame: &mut Frame, area: Rect, profile: &Profile) {
    let (card, _) = area.split_top(9);
    if card.height < 3 {
        return;
    }
    frame.fill(card, theme::surface());
    frame.border(card, theme::surface_border());
    let inner = card.inset_xy(spacing::SM, spacing::XS);

    let presence = if profile.online {
        ("● ", Style::new().fg(palette::SUCCESS))
    } else {
        ("○ ", theme::faint())
    };
    let handle = format!("@{}", profile.username);
    let id = format!("ID {}", profile.user_id);
    let joined = format!("Joined {}", profile.joined);
    let friends = format_count(profile.friends);
    let followers = format_count(profile.followers);
    let following = format_count(profile.following);

    let lines: [&[(&str, Style)]; 7] = [
        &[
            (profile.avatar.as_str(), Style::new()),
            (" ", Style::new()),
            (profile.display_name.as_str(), theme::strong()),
        ],
        &[(handle.as_str(), theme::subtle())],
        &[presence, (profile.presence_label(), theme::muted())],
        &[(id.as_str(), theme::faint())],
        &[(profile.status.as_str(), theme::muted())],
        &[(joined.as_str(), theme::faint())],
        &[
            (friends.as_str(), theme::strong()),
            (" Friends  ", theme::subtle()),
            (followers.as_str(), theme::strong()),
            (" Followers  ", theme::subtle()),
            (following.as_str(), theme::strong()),
            (" Following", theme::subtle()),
        ],
    ];
    for (y, segments) in (inner.y..inner.bottom()).zip(lines) {
        let mut x = inner.x;
        for &(text, style) in segments {
            x = frame.print(x, y, text, style, inner.right());
        }
    }
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let (_, rest) = area.split_top(2);
    let (icon, rest) = rest.split_top(1);
    let (title, rest) = rest.split_top(1);
    let (hint, _) = rest.split_top(1);
    print_centered(frame, icon, "🎮", Style::new());
    print_centered(frame, title, EMPTY_TITLE, theme::strong());
    print_centered(frame, hint, EMPTY_HINT, theme::muted());
}

fn render_footer(frame: &mut Frame, area: Rect, state: &ViewState) {
    let hint = match state.focus {
        Focus::Search => "Enter search · Tab next section · Esc quit",
        Focus::Filters => "←/→ or 1-4 filter · Tab next section · Esc quit",
        Focus::Tabs => "←/→ switch tab · Tab next section · Esc quit",
    };
    print_centered(frame, area, hint, theme::faint());
}

fn render_toasts(frame: &mut Frame, area: Rect, toasts: &ToastStack) {
    let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
    if width < 8 {
        return;
    }
    let x = area.right() - width - 1;
    for (i, notice) in toasts.iter().enumerate() {
        let y = area.y + 1 + i as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.bottom() {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);
        let accent = match notice.kind {
            NoticeKind::Success => palette::SUCCESS,
            NoticeKind::Failure => palette::FAILURE,
        };
        frame.fill(rect, Style::new().bg(palette::PAGE_BG));
        frame.fill(rect, theme::surface());
        frame.border(rect, Style::new().fg(accent));
        let inner = rect.inset_xy(spacing::SM, spacing::XS);
        frame.print_in(inner, &notice.title, Style::new().fg(accent).bold());
        let desc = ellipsize(&notice.description, inner.width as usize);
        frame.print_in(inner.split_top(1).1, &desc, theme::muted());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppConfig;
    use crate::catalog::mock_inventory;
    use crate::notify::Notice;
    use crate::app::AppMsg;
    use crate::input::InputEdit;
    use crate::source::{InventorySource, MockSource};
    use crate::state::{SearchResults, ViewEvent};
    use invview_runtime::Model;
    use std::sync::Arc;
    use std::time::Duration;

    fn app(variant: Variant) -> AppModel {
        AppModel::new(
            AppConfig {
                variant,
                ..AppConfig::default()
            },
            Arc::new(MockSource::seeded(Duration::ZERO, 3)),
        )
    }

    fn draw(app: &AppModel, w: u16, h: u16) -> String {
        let mut frame = Frame::new(w, h);
        app.view(&mut frame);
        frame.buffer.to_text()
    }

    #[test]
    fn empty_state_before_any_search() {
        let text = draw(&app(Variant::Inventory), 100, 30);
        assert!(text.contains(EMPTY_TITLE));
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("Player Inventory"));
    }

    #[test]
    fn tiny_frames_do_not_panic() {
        let a = app(Variant::Profile);
        for (w, h) in [(0, 0), (1, 1), (5, 3), (20, 4), (30, 10)] {
            draw(&a, w, h);
        }
    }

    #[test]
    fn split_bottom_takes_last_rows() {
        let (top, bottom) = split_bottom(Rect::new(0, 0, 10, 5), 1);
        assert_eq!(top, Rect::new(0, 0, 10, 4));
        assert_eq!(bottom, Rect::new(0, 4, 10, 1));
    }

    #[test]
    fn grid_shows_cards_with_badges_and_prices() {
        let mut frame = Frame::new(90, 30);
        let items = mock_inventory();
        let refs: Vec<&Item> = items.iter().take(3).collect();
        render_grid(&mut frame, Rect::new(0, 0, 90, 30), &refs);
        let text = frame.buffer.to_text();
        assert!(text.contains("legendary"));
        assert!(text.contains("Crimson Samurai"));
        assert!(text.contains("1500R$"));
        assert!(text.contains("Back Accessory"));
    }

    #[test]
    fn empty_grid_shows_placeholder() {
        let mut frame = Frame::new(60, 10);
        render_grid(&mut frame, Rect::new(0, 0, 60, 10), &[]);
        assert!(frame.buffer.to_text().contains(NO_ITEMS));
    }

    #[test]
    fn profile_summary_lines() {
        let source = MockSource::seeded(Duration::ZERO, 3);
        let profile = crate::source::InventorySource::fetch_profile(&source, "Roblox123").unwrap();
        let mut frame = Frame::new(80, 12);
        render_profile(&mut frame, Rect::new(0, 0, 80, 12), &profile);
        let text = frame.buffer.to_text();
        assert!(text.contains("@Roblox123"));
        assert!(text.contains(profile.presence_label()));
        assert!(text.contains(&format!("ID {}", profile.user_id)));
        assert!(text.contains("1.3K Followers"));
    }

    #[test]
    fn toasts_render_top_right() {
        let mut stack = ToastStack::new(5);
        stack.push(Notice::empty_username());
        let mut frame = Frame::new(100, 20);
        let bounds = frame.bounds();
        render_toasts(&mut frame, bounds, &stack);
        let row = frame.buffer.row_text(2);
        let at = row.find("Enter a username").unwrap();
        assert!(at > 50, "toast should sit on the right, found at {at}");
    }

    #[test]
    fn results_replace_empty_state() {
        let mut a = app(Variant::Inventory);
        a.update(AppMsg::View(ViewEvent::Input(InputEdit::InsertStr("Roblox123".into()))));
        a.update(AppMsg::View(ViewEvent::Submit));
        let generation = a.state().generation;
        a.update(AppMsg::View(ViewEvent::Resolved {
            generation,
            outcome: Ok(SearchResults {
                username: "Roblox123".into(),
                items: mock_inventory(),
                profile: None,
            }),
        }));
        let text = draw(&a, 100, 40);
        assert!(!text.contains(EMPTY_TITLE));
        assert!(text.contains("Galaxy Sword"));
        assert!(text.contains("Clothing"));
    }

    fn pasted(variant: Variant, text: &str) -> AppModel {
        let mut a = app(variant);
        a.update(AppMsg::View(ViewEvent::Input(InputEdit::InsertStr(text.into()))));
        a
    }

    /// Cursor position and the text of the row it sits on.
    fn cursor_row(app: &AppModel, w: u16, h: u16) -> ((u16, u16), String) {
        let mut frame = Frame::new(w, h);
        app.view(&mut frame);
        let cursor = frame.cursor().unwrap();
        (cursor, frame.buffer.row_text(cursor.1))
    }

    #[test]
    fn huge_paste_renders_with_a_cursor() {
        let a = pasted(Variant::Inventory, &"a".repeat(65_534));
        let ((x, _), row) = cursor_row(&a, 100, 40);
        assert!(x < 100);
        assert!(row.contains("aaaa"));
    }

    #[test]
    fn wide_input_scrolls_to_keep_the_tail_visible() {
        let name = format!("{}END", "player_".repeat(8));
        let mut a = pasted(Variant::Inventory, &name);
        assert_eq!(a.state().input.text(), name);

        let ((x, _), row) = cursor_row(&a, 60, 20);
        let at = row.find("END").unwrap();
        let end_col = row[..at].chars().count() + 3;
        assert_eq!(usize::from(x), end_col);
        assert!(!row.contains(&name));

        a.update(AppMsg::View(ViewEvent::Input(InputEdit::Home)));
        let (_, row) = cursor_row(&a, 60, 20);
        assert!(row.contains("player_player_"));
        assert!(!row.contains("END"));
    }

    #[test]
    fn narrow_input_is_not_scrolled() {
        let a = pasted(Variant::Inventory, "Roblox123");
        let ((x, _), row) = cursor_row(&a, 100, 40);
        let at = row.find("Roblox123").unwrap();
        assert_eq!(usize::from(x), row[..at].chars().count() + 9);
    }

    #[test]
    fn field_window_skips_a_straddling_wide_grapheme() {
        assert_eq!(field_window("abc", 3, 10), (0, 0, 3));
        assert_eq!(field_window("abcdef", 6, 4), (3, 0, 3));
        // "日本語" is six cells wide; the view starts mid-way through "本".
        assert_eq!(field_window("日本語", 6, 4), (6, 1, 3));
        assert_eq!(field_window("abcdef", 0, 4), (0, 0, 0));
    }

    #[test]
    fn filter_chips_only_show_with_the_grid() {
        let profile = MockSource::seeded(Duration::ZERO, 3)
            .fetch_profile("Roblox123")
            .unwrap();
        let mut a = app(Variant::Profile);
        a.update(AppMsg::View(ViewEvent::Input(InputEdit::InsertStr("Roblox123".into()))));
        a.update(AppMsg::View(ViewEvent::Submit));
        let generation = a.state().generation;
        a.update(AppMsg::View(ViewEvent::Resolved {
            generation,
            outcome: Ok(SearchResults {
                username: "Roblox123".into(),
                items: mock_inventory(),
                profile: Some(profile),
            }),
        }));

        let text = draw(&a, 100, 40);
        assert!(text.contains("@Roblox123"));
        assert!(!text.contains("Clothing"));

        a.update(AppMsg::View(ViewEvent::SelectTab(Tab::Inventory)));
        let text = draw(&a, 100, 40);
        assert!(text.contains("Clothing"));
        assert!(text.contains("Galaxy Sword"));
    }
}
