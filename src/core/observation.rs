use crate::core::sanitizer::sanitize;
use crate::domain::model::ExtractedFields;

/// Pull `label: value` pairs out of an observation block.
///
/// Keys are the 1-based position of the line in the block, so lines without
/// a colon leave a gap. The label itself carries no meaning.
pub fn parse(observation: &str) -> ExtractedFields {
    let mut fields = ExtractedFields::new();

    for (index, line) in observation.split('\n').enumerate() {
        let Some((label, raw_value)) = line.split_once(':') else {
            continue;
        };

        let value = sanitize(raw_value.trim());
        tracing::debug!(
            line = index + 1,
            label = label.trim(),
            original = raw_value.trim(),
            cleaned = %value,
            "Extracted observation field"
        );
        fields.insert(index + 1, value);
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys_by_line_position() {
        let fields = parse("Nome: Ana Silva\nCPF: 123.456.789-00");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[&1], "Ana Silva");
        assert_eq!(fields[&2], "123.456.789-00");
    }

    #[test]
    fn test_colonless_and_empty_lines_leave_gaps() {
        let fields = parse("Nome: Ana\n\nsem separador\nPessoas: 3");
        assert_eq!(fields.keys().copied().collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(fields[&4], "3");
    }

    #[test]
    fn test_only_first_colon_splits() {
        let fields = parse("Entrada: 10/03 às 14:00");
        assert_eq!(fields[&1], "1003 às 14:00");

        let fields = parse("Obs: a: b: c");
        assert_eq!(fields[&1], "a: b: c");
    }

    #[test]
    fn test_label_is_ignored() {
        assert_eq!(parse("anything: Ana"), parse("Nome: Ana"));
        assert_eq!(parse(": Ana")[&1], "Ana");
    }

    #[test]
    fn test_values_are_trimmed_and_sanitized() {
        let fields = parse("Nome:   Ana <b>Silva</b>  \r\nTelefone:\t(11) 98765-4321\r");
        assert_eq!(fields[&1], "Ana Silva");
        assert_eq!(fields[&2], "(11) 98765-4321");
    }

    #[test]
    fn test_empty_value_is_still_an_entry() {
        let fields = parse("Nome:\nCPF: 1");
        assert_eq!(fields[&1], "");
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_entry_count_bounded_by_non_empty_lines() {
        let samples = [
            "",
            "\n\n\n",
            "a:1\nb\n:c\n\nd:e:f",
            "x: y\r\nno colon here\r\n z : w ",
        ];
        for sample in samples {
            let fields = parse(sample);
            let lines: Vec<&str> = sample.split('\n').collect();
            let non_empty = lines.iter().filter(|l| !l.is_empty()).count();
            assert!(fields.len() <= non_empty);
            for key in fields.keys() {
                assert!(*key >= 1 && *key <= lines.len());
            }
        }
    }
}
