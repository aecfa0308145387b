mod common;

use chart_drawings::core::LinePoint;
use chart_drawings::interaction::{
    HorizontalLineInteraction, HorizontalLineInteractionMode, NewTrendLineStyle,
    TrendLineInteraction, TrendLineInteractionMode,
};
use chart_drawings::primitives::{
    HorizontalLine, HorizontalLinePrimitive, LineHandle, SeriesPrimitive, TrendLine,
    TrendLinePrimitive,
};
use chart_drawings::render::LineStrokeStyle;

use common::{attach, green, horizontal_source, red, trend_source};

fn trend_setup() -> (TrendLinePrimitive, TrendLineInteraction) {
    let mut primitive = TrendLinePrimitive::new();
    attach(&mut primitive, trend_source());
    (primitive, TrendLineInteraction::new(NewTrendLineStyle::new(green())))
}

/// Draws (1000, 100) -> (2000, 110), i.e. pixels (250, 300) -> (500, 280).
fn draw_line(primitive: &mut TrendLinePrimitive, interaction: &mut TrendLineInteraction) -> String {
    interaction.pointer_down(primitive, 250.0, 300.0);
    interaction.pointer_move(primitive, 500.0, 280.0);
    interaction.pointer_up(primitive).expect("line committed")
}

#[test]
fn press_drag_release_commits_a_trend_line() {
    let (mut primitive, mut interaction) = trend_setup();

    assert_eq!(
        interaction.pointer_down(&mut primitive, 250.0, 300.0),
        TrendLineInteractionMode::Drawing
    );
    assert_eq!(primitive.preview_start(), Some(LinePoint::new(1000, 100.0)));

    interaction.pointer_move(&mut primitive, 500.0, 280.0);
    assert_eq!(primitive.preview_end(), Some(LinePoint::new(2000, 110.0)));
    primitive.update_all_views();
    assert_eq!(primitive.render_records().len(), 1);

    let id = interaction.pointer_up(&mut primitive).expect("committed");
    assert_eq!(id, "trend-1");
    assert_eq!(interaction.mode(), TrendLineInteractionMode::Idle);
    assert_eq!(primitive.preview_start(), None);
    assert_eq!(primitive.preview_end(), None);
    assert_eq!(
        primitive.lines(),
        &[TrendLine::new(
            "trend-1",
            LinePoint::new(1000, 100.0),
            LinePoint::new(2000, 110.0),
            green(),
        )]
    );
}

#[test]
fn release_without_move_commits_nothing() {
    let (mut primitive, mut interaction) = trend_setup();
    interaction.pointer_down(&mut primitive, 250.0, 300.0);

    assert_eq!(interaction.pointer_up(&mut primitive), None);
    assert!(primitive.lines().is_empty());
    assert_eq!(primitive.preview_start(), None);
    assert_eq!(interaction.mode(), TrendLineInteractionMode::Idle);
}

#[test]
fn generated_ids_use_prefix_and_counter() {
    let mut primitive = TrendLinePrimitive::new();
    attach(&mut primitive, trend_source());
    let mut interaction =
        TrendLineInteraction::new(NewTrendLineStyle::new(green())).with_id_prefix("tl");

    assert_eq!(draw_line(&mut primitive, &mut interaction), "tl-1");
    interaction.pointer_down(&mut primitive, 100.0, 100.0);
    interaction.pointer_move(&mut primitive, 150.0, 120.0);
    assert_eq!(interaction.pointer_up(&mut primitive).as_deref(), Some("tl-2"));
    assert_eq!(primitive.lines().len(), 2);
}

#[test]
fn committed_line_uses_the_current_style() {
    let (mut primitive, mut interaction) = trend_setup();
    interaction.set_style(NewTrendLineStyle {
        color: red(),
        line_width: Some(2.0),
        line_style: Some(LineStrokeStyle::Dotted),
    });
    assert_eq!(interaction.style().color, red());

    let id = draw_line(&mut primitive, &mut interaction);
    let line = primitive.line(&id).expect("line");
    assert_eq!(line.color, red());
    assert_eq!(line.line_width, Some(2.0));
    assert_eq!(line.line_style, Some(LineStrokeStyle::Dotted));
}

#[test]
fn press_on_line_selects_it() {
    let (mut primitive, mut interaction) = trend_setup();
    let id = draw_line(&mut primitive, &mut interaction);

    assert_eq!(
        interaction.pointer_down(&mut primitive, 375.0, 290.0),
        TrendLineInteractionMode::Selected
    );
    assert_eq!(primitive.selected_id(), Some(id.as_str()));
    assert_eq!(interaction.pointer_up(&mut primitive), None);
    assert_eq!(interaction.mode(), TrendLineInteractionMode::Selected);
}

#[test]
fn dragging_a_handle_moves_only_that_endpoint() {
    let (mut primitive, mut interaction) = trend_setup();
    let id = draw_line(&mut primitive, &mut interaction);
    interaction.pointer_down(&mut primitive, 375.0, 290.0);
    interaction.pointer_up(&mut primitive);

    assert_eq!(
        interaction.pointer_down(&mut primitive, 500.0, 280.0),
        TrendLineInteractionMode::DraggingHandle(LineHandle::End)
    );
    interaction.pointer_move(&mut primitive, 600.0, 250.0);
    interaction.pointer_up(&mut primitive);

    let line = primitive.line(&id).expect("line");
    assert_eq!(line.start_point, LinePoint::new(1000, 100.0));
    assert_eq!(line.end_point, LinePoint::new(2400, 125.0));
    assert_eq!(interaction.mode(), TrendLineInteractionMode::Selected);
    assert_eq!(primitive.selected_id(), Some(id.as_str()));
}

#[test]
fn dragging_the_body_translates_both_endpoints() {
    let (mut primitive, mut interaction) = trend_setup();
    let id = draw_line(&mut primitive, &mut interaction);
    interaction.pointer_down(&mut primitive, 375.0, 290.0);
    interaction.pointer_up(&mut primitive);

    assert_eq!(
        interaction.pointer_down(&mut primitive, 375.0, 290.0),
        TrendLineInteractionMode::DraggingBody
    );
    // (1500, 105) -> (1900, 115)
    interaction.pointer_move(&mut primitive, 475.0, 270.0);

    let line = primitive.line(&id).expect("line");
    assert_eq!(line.start_point, LinePoint::new(1400, 110.0));
    assert_eq!(line.end_point, LinePoint::new(2400, 120.0));

    // Moves are relative to the press, not cumulative.
    interaction.pointer_move(&mut primitive, 475.0, 270.0);
    let line = primitive.line(&id).expect("line");
    assert_eq!(line.start_point, LinePoint::new(1400, 110.0));
}

#[test]
fn cancel_reverts_an_in_flight_drag() {
    let (mut primitive, mut interaction) = trend_setup();
    let id = draw_line(&mut primitive, &mut interaction);
    interaction.pointer_down(&mut primitive, 375.0, 290.0);
    interaction.pointer_up(&mut primitive);
    interaction.pointer_down(&mut primitive, 375.0, 290.0);
    interaction.pointer_move(&mut primitive, 475.0, 270.0);

    interaction.cancel(&mut primitive);
    let line = primitive.line(&id).expect("line");
    assert_eq!(line.start_point, LinePoint::new(1000, 100.0));
    assert_eq!(line.end_point, LinePoint::new(2000, 110.0));
    assert_eq!(interaction.mode(), TrendLineInteractionMode::Selected);

    interaction.cancel(&mut primitive);
    assert_eq!(interaction.mode(), TrendLineInteractionMode::Idle);
    assert_eq!(primitive.selected_id(), None);
}

#[test]
fn cancel_while_drawing_drops_the_preview() {
    let (mut primitive, mut interaction) = trend_setup();
    interaction.pointer_down(&mut primitive, 250.0, 300.0);
    interaction.pointer_move(&mut primitive, 500.0, 280.0);

    interaction.cancel(&mut primitive);
    assert_eq!(interaction.mode(), TrendLineInteractionMode::Idle);
    assert_eq!(primitive.preview_start(), None);
    assert_eq!(primitive.preview_end(), None);
    assert_eq!(interaction.pointer_up(&mut primitive), None);
    assert!(primitive.lines().is_empty());
}

#[test]
fn press_elsewhere_deselects_and_press_on_other_line_switches() {
    let (mut primitive, mut interaction) = trend_setup();
    draw_line(&mut primitive, &mut interaction);
    primitive.add_line(TrendLine::new(
        "other",
        LinePoint::new(500, 50.0),
        LinePoint::new(900, 60.0),
        red(),
    ));

    interaction.pointer_down(&mut primitive, 375.0, 290.0);
    interaction.pointer_up(&mut primitive);
    assert_eq!(primitive.selected_id(), Some("trend-1"));

    // "other" runs from (125, 400) to (225, 380).
    assert_eq!(
        interaction.pointer_down(&mut primitive, 175.0, 390.0),
        TrendLineInteractionMode::Selected
    );
    assert_eq!(primitive.selected_id(), Some("other"));
    interaction.pointer_up(&mut primitive);

    assert_eq!(
        interaction.pointer_down(&mut primitive, 800.0, 50.0),
        TrendLineInteractionMode::Idle
    );
    assert_eq!(primitive.selected_id(), None);
    assert_eq!(primitive.preview_start(), None);
}

#[test]
fn selection_of_a_removed_line_falls_back_to_idle_press() {
    let (mut primitive, mut interaction) = trend_setup();
    let id = draw_line(&mut primitive, &mut interaction);
    interaction.pointer_down(&mut primitive, 375.0, 290.0);
    interaction.pointer_up(&mut primitive);

    primitive.remove_line(&id);
    assert_eq!(
        interaction.pointer_down(&mut primitive, 250.0, 300.0),
        TrendLineInteractionMode::Drawing
    );
}

#[test]
fn handle_drag_follows_selection_changed_by_the_host() {
    let (mut primitive, mut interaction) = trend_setup();
    let first = draw_line(&mut primitive, &mut interaction);
    // (250, 100) -> (500, 80)
    primitive.add_line(TrendLine::new(
        "b",
        LinePoint::new(1000, 200.0),
        LinePoint::new(2000, 210.0),
        red(),
    ));
    interaction.pointer_down(&mut primitive, 375.0, 290.0);
    interaction.pointer_up(&mut primitive);
    assert_eq!(primitive.selected_id(), Some(first.as_str()));

    assert!(primitive.set_selected_id(Some("b")));
    assert_eq!(
        interaction.pointer_down(&mut primitive, 250.0, 100.0),
        TrendLineInteractionMode::DraggingHandle(LineHandle::Start)
    );
    interaction.pointer_move(&mut primitive, 300.0, 100.0);
    interaction.pointer_up(&mut primitive);

    let untouched = primitive.line(&first).expect("first line");
    assert_eq!(untouched.start_point, LinePoint::new(1000, 100.0));
    assert_eq!(untouched.end_point, LinePoint::new(2000, 110.0));
    let moved = primitive.line("b").expect("second line");
    assert_eq!(moved.start_point, LinePoint::new(1200, 200.0));
    assert_eq!(moved.end_point, LinePoint::new(2000, 210.0));
    assert_eq!(primitive.selected_id(), Some("b"));
}

#[test]
fn host_selection_while_idle_enables_handle_drag() {
    let (mut primitive, mut interaction) = trend_setup();
    let id = draw_line(&mut primitive, &mut interaction);
    assert_eq!(interaction.mode(), TrendLineInteractionMode::Idle);

    primitive.set_selected_id(Some(&id));
    assert_eq!(
        interaction.pointer_down(&mut primitive, 500.0, 280.0),
        TrendLineInteractionMode::DraggingHandle(LineHandle::End)
    );
    interaction.pointer_move(&mut primitive, 600.0, 250.0);
    interaction.pointer_up(&mut primitive);

    let line = primitive.line(&id).expect("line");
    assert_eq!(line.end_point, LinePoint::new(2400, 125.0));
    assert_eq!(primitive.lines().len(), 1);
}

#[test]
fn host_deselection_makes_the_next_press_draw() {
    let (mut primitive, mut interaction) = trend_setup();
    draw_line(&mut primitive, &mut interaction);
    interaction.pointer_down(&mut primitive, 375.0, 290.0);
    interaction.pointer_up(&mut primitive);

    primitive.set_selected_id(None);
    assert_eq!(
        interaction.pointer_down(&mut primitive, 800.0, 50.0),
        TrendLineInteractionMode::Drawing
    );
    assert!(primitive.preview_start().is_some());
}

#[test]
fn horizontal_press_on_empty_space_clears_host_selection() {
    let mut primitive = HorizontalLinePrimitive::new();
    attach(&mut primitive, horizontal_source());
    primitive.add_line(HorizontalLine::new("h1", 50_000.0, green()));
    let mut interaction = HorizontalLineInteraction::new();

    assert!(primitive.set_selected_id(Some("h1")));
    assert_eq!(interaction.mode(), HorizontalLineInteractionMode::Idle);
    assert_eq!(
        interaction.pointer_down(&mut primitive, 400.0),
        HorizontalLineInteractionMode::Idle
    );
    assert_eq!(primitive.selected_id(), None);
}

#[test]
fn horizontal_press_and_drag_moves_the_line() {
    let mut primitive = HorizontalLinePrimitive::new();
    attach(&mut primitive, horizontal_source());
    primitive.add_line(HorizontalLine::new("h1", 50_000.0, green()));
    let mut interaction = HorizontalLineInteraction::new();

    assert_eq!(
        interaction.pointer_down(&mut primitive, 121.0),
        HorizontalLineInteractionMode::Dragging
    );
    assert_eq!(primitive.selected_id(), Some("h1"));

    interaction.pointer_move(&mut primitive, 220.0);
    assert_eq!(primitive.lines()[0].price, 49_900.0);

    interaction.pointer_up();
    assert_eq!(interaction.mode(), HorizontalLineInteractionMode::Selected);

    assert_eq!(
        interaction.pointer_down(&mut primitive, 400.0),
        HorizontalLineInteractionMode::Idle
    );
    assert_eq!(primitive.selected_id(), None);
}

#[test]
fn horizontal_cancel_restores_the_original_price() {
    let mut primitive = HorizontalLinePrimitive::new();
    attach(&mut primitive, horizontal_source());
    primitive.add_line(HorizontalLine::new("h1", 50_000.0, green()));
    let mut interaction = HorizontalLineInteraction::new();

    interaction.pointer_down(&mut primitive, 120.0);
    interaction.pointer_move(&mut primitive, 300.0);
    interaction.cancel(&mut primitive);

    assert_eq!(primitive.lines()[0].price, 50_000.0);
    assert_eq!(interaction.mode(), HorizontalLineInteractionMode::Selected);

    interaction.cancel(&mut primitive);
    assert_eq!(interaction.mode(), HorizontalLineInteractionMode::Idle);
    assert_eq!(primitive.selected_id(), None);
}

#[test]
fn horizontal_move_outside_the_pane_is_ignored() {
    let mut primitive = HorizontalLinePrimitive::new();
    attach(&mut primitive, horizontal_source());
    primitive.add_line(HorizontalLine::new("h1", 50_000.0, green()));
    let mut interaction = HorizontalLineInteraction::new();

    interaction.pointer_move(&mut primitive, 200.0);
    assert_eq!(primitive.lines()[0].price, 50_000.0);

    interaction.pointer_down(&mut primitive, 120.0);
    interaction.pointer_move(&mut primitive, 900.0);
    assert_eq!(primitive.lines()[0].price, 50_000.0);
}
