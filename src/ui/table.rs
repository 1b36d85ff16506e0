use tabled::builder::Builder;
use tabled::settings::{Padding, Style};

use crate::ui::widgets::TableSpec;

/// Borderless table with two spaces between columns and no trailing padding.
pub fn render_table(spec: &TableSpec) -> String {
    let mut builder = Builder::default();
    if !spec.headers.is_empty() {
        builder.push_record(spec.headers.iter().map(String::as_str));
    }
    for row in &spec.rows {
        builder.push_record(row.iter().map(String::as_str));
    }
    let mut table = builder.build();
    table.with(Style::blank()).with(Padding::new(0, 2, 0, 0));
    table
        .to_string()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<&str>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::render_table;
    use crate::ui::widgets::TableSpec;

    #[test]
    fn aligns_columns_without_trailing_whitespace() {
        let rendered = render_table(&TableSpec::new(
            vec!["action".to_owned(), "path".to_owned()],
            vec![
                vec!["create".to_owned(), "libs/lib1/karma.conf.js".to_owned()],
                vec!["update".to_owned(), "angular.json".to_owned()],
            ],
        ));
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| !line.ends_with(' ')));
        assert_eq!(lines[2].find("angular.json"), lines[1].find("libs/"));
    }
}
