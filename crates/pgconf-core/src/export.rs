//! Rendering of the configuration as `postgresql.conf` key/value text

use crate::model::Parameter;

/// Render a header followed by one commented section per category.
///
/// Every header line ends with a newline. Each category contributes a blank
/// line, `# <category>`, then `<name> = <value>` for each parameter in the
/// order given.
pub fn render_key_value<'a, C, P>(header: Option<&str>, categories: C) -> String
where
    C: IntoIterator<Item = (&'a str, P)>,
    P: IntoIterator<Item = &'a Parameter>,
{
    let mut out = String::new();

    if let Some(header) = header {
        for line in header.lines() {
            out.push_str(line);
            out.push('\n');
        }
    }

    for (category, params) in categories {
        out.push_str(&format!("\n# {}\n", category));
        for param in params {
            out.push_str(&format!("{} = {}\n", param.name, param.value));
        }
    }

    out
}
