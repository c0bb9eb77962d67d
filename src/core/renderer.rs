use crate::domain::model::{ExtractedFields, FieldLayout, FieldSlot, Placement};
use crate::domain::ports::PageCanvas;
use crate::utils::error::Result;
use chrono::{Datelike, NaiveDate};

/// Draw the extracted fields and the signature date onto a page.
///
/// Lines past the last slot, and slots the layout has no position for, are
/// skipped. The date is drawn once whatever the fields contain.
pub fn render<C: PageCanvas>(
    canvas: &mut C,
    layout: &FieldLayout,
    fields: &ExtractedFields,
    date: NaiveDate,
) -> Result<()> {
    for (ordinal, value) in fields {
        let Some(slot) = FieldSlot::from_ordinal(*ordinal) else {
            continue;
        };
        for placement in layout.placements(slot) {
            draw(canvas, value, placement)?;
        }
    }

    let stamp = &layout.date_stamp;
    draw(canvas, &date.day().to_string(), &stamp.day)?;
    draw(canvas, &date.month().to_string(), &stamp.month)?;
    draw(canvas, &date.year().to_string(), &stamp.year)?;

    Ok(())
}

fn draw<C: PageCanvas>(canvas: &mut C, text: &str, placement: &Placement) -> Result<()> {
    canvas.draw_text(
        text,
        placement.x,
        placement.y,
        placement.font_size,
        placement.color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::LayoutRegistry;
    use crate::core::observation::parse;
    use crate::domain::model::Rgb;

    #[derive(Default)]
    struct RecordingCanvas {
        drawn: Vec<(String, f32, f32)>,
    }

    impl PageCanvas for RecordingCanvas {
        fn draw_text(&mut self, text: &str, x: f32, y: f32, _size: f32, _color: Rgb) -> Result<()> {
            self.drawn.push((text.to_string(), x, y));
            Ok(())
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    fn drawn(text: &str, x: f32, y: f32) -> (String, f32, f32) {
        (text.to_string(), x, y)
    }

    #[test]
    fn test_name_and_document_on_contract_204() {
        let registry = LayoutRegistry::builtin().unwrap();
        let layout = registry.resolve("204").unwrap();
        let fields = parse("Nome: Ana Silva\nCPF: 123.456.789-00");

        let mut canvas = RecordingCanvas::default();
        render(&mut canvas, layout, &fields, date()).unwrap();

        assert_eq!(
            canvas.drawn,
            vec![
                drawn("Ana Silva", 100.0, 696.0),
                drawn("Ana Silva", 110.0, 282.0),
                drawn("123.456.789-00", 90.0, 262.0),
                drawn("7", 265.0, 180.0),
                drawn("3", 340.0, 180.0),
                drawn("2025", 485.0, 180.0),
            ]
        );
    }

    #[test]
    fn test_date_drawn_once_without_fields() {
        let registry = LayoutRegistry::builtin().unwrap();
        let layout = registry.resolve("bragao").unwrap();

        let mut canvas = RecordingCanvas::default();
        render(&mut canvas, layout, &ExtractedFields::new(), date()).unwrap();

        assert_eq!(canvas.drawn.len(), 3);
        assert_eq!(canvas.drawn[2], drawn("2025", 485.0, 180.0));
    }

    #[test]
    fn test_every_slot_on_bragao() {
        let registry = LayoutRegistry::builtin().unwrap();
        let layout = registry.resolve("bragao").unwrap();
        let observation = "Nome: Ana\nCPF: 1\nPessoas: 2\nEntrada: 3\nSaida: 4\nPago: 5\nTotal: 6\nEndereco: 7\nTelefone: 8\nExtra: ignorado";
        let fields = parse(observation);

        let mut canvas = RecordingCanvas::default();
        render(&mut canvas, layout, &fields, date()).unwrap();

        // ten slots drawn (name twice), the tenth line ignored, three date parts
        assert_eq!(canvas.drawn.len(), 13);
        assert!(canvas.drawn.contains(&drawn("2", 180.0, 641.0)));
        assert!(canvas.drawn.contains(&drawn("8", 95.0, 222.0)));
        assert!(!canvas.drawn.iter().any(|(text, _, _)| text == "ignorado"));
    }

    #[test]
    fn test_gaps_keep_positional_meaning() {
        let registry = LayoutRegistry::builtin().unwrap();
        let layout = registry.resolve("304").unwrap();
        // line 2 has no colon, so line 3 still lands on the occupant count
        let fields = parse("Nome: Ana\nsem documento\nPessoas: 4");

        let mut canvas = RecordingCanvas::default();
        render(&mut canvas, layout, &fields, date()).unwrap();

        assert!(canvas.drawn.contains(&drawn("4", 180.0, 647.0)));
        assert!(!canvas.drawn.iter().any(|(_, x, y)| *x == 90.0 && *y == 262.0));
    }
}
