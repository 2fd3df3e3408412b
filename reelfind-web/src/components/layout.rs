//! Layout components - page shell, banner, buttons, inputs

/// Escape text for interpolation into HTML content or attribute values.
///
/// Queries, titles and API error messages are user- or third-party-supplied
/// and must not be able to break out of the markup.
pub fn escape(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            other => other.to_string(),
        })
        .collect()
}

/// Wraps page content in the full HTML document shell.
///
/// Includes the Tailwind CDN and the shared dark color scheme so every page
/// renders consistently without a static asset pipeline.
pub fn page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <meta name="viewport" content="width=device-width, initial-scale=1.0">
            <title>{title} - Reelfind</title>
            <script src="https://cdn.tailwindcss.com"></script>
        </head>
        <body class="bg-gray-700 text-white min-h-screen">
            <div class="container mx-auto px-4 py-4 flex flex-col gap-4">
                {content}
            </div>
        </body>
        </html>"#,
        title = escape(title),
    )
}

/// Renders a button with Tailwind styling.
///
/// Variants: primary (actions), secondary (navigation), pager (Previous/
/// Next). Additional attributes such as `disabled` pass through verbatim.
pub fn button(text: &str, variant: &str, attributes: Option<&str>) -> String {
    let variant_classes = match variant {
        "primary" => "bg-blue-500 hover:bg-blue-600 text-white",
        "pager" => "bg-gray-400 hover:bg-gray-500 text-gray-900 disabled:opacity-50",
        _ => "bg-gray-500 hover:bg-gray-600 text-white",
    };

    let attrs = attributes.unwrap_or("");

    format!(
        r#"<button class="px-4 py-2 rounded font-semibold {variant_classes}" {attrs}>{text}</button>"#
    )
}

/// Renders a text input with consistent styling.
pub fn input(name: &str, placeholder: &str, value: &str) -> String {
    format!(
        r#"<input type="text" name="{name}" value="{value}" placeholder="{placeholder}"
                  class="border p-2 rounded w-full text-gray-900" />"#,
        value = escape(value),
    )
}
