//! Pure render functions from view models to markup. Every interpolated
//! value goes through `escape_html`.

use crate::store::{Attribute, Drink};

use super::state::CatalogPage;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// vi-VN currency style: dot-grouped integer part with a ₫ suffix.
pub fn format_vnd(amount: f64) -> String {
    let negative = amount < 0.0;
    let mut n = amount.abs().round() as u64;
    let mut groups = Vec::new();
    loop {
        let rem = n % 1000;
        n /= 1000;
        if n == 0 {
            groups.push(rem.to_string());
            break;
        }
        groups.push(format!("{rem:03}"));
    }
    groups.reverse();
    let joined = groups.join(".");
    if negative {
        format!("-{joined} ₫")
    } else {
        format!("{joined} ₫")
    }
}

fn price_text(price: Option<f64>) -> String {
    format_vnd(price.unwrap_or(0.0))
}

fn name_text(drink: &Drink) -> &str {
    drink.name.as_deref().unwrap_or("(unnamed)")
}

fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem auto; max-width: 60rem; padding: 0 1rem; }}
nav a {{ margin-right: 1rem; }}
.drink-card {{ display: block; border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin: 0.5rem 0; color: inherit; text-decoration: none; }}
.drink-images img {{ width: 80px; margin-right: 0.5rem; }}
.drink-price {{ font-weight: bold; }}
.attribute-tag {{ background: #eee; border-radius: 4px; padding: 0.1rem 0.4rem; margin-right: 0.3rem; }}
.pagination a, .pagination span {{ margin-right: 0.5rem; }}
.message-error {{ color: #b00; }}
</style>
</head>
<body>
<nav>
<a href="/">Home</a>
<a href="/read">Catalog</a>
<a href="/create">Add drink</a>
<a href="/update">Update</a>
<a href="/delete">Delete</a>
</nav>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

fn images_block(drink: &Drink) -> String {
    if drink.images.is_empty() {
        return "<p>No images available</p>".into();
    }
    let alt = escape_html(name_text(drink));
    drink
        .images
        .iter()
        .map(|src| format!(r#"<img src="{}" alt="{}">"#, escape_html(src), alt))
        .collect()
}

fn attribute_tags(attributes: &[Attribute]) -> String {
    attributes
        .iter()
        .map(|a| {
            format!(
                r#"<span class="attribute-tag">{}: {}</span>"#,
                escape_html(&a.key),
                escape_html(&a.value)
            )
        })
        .collect()
}

fn drink_card(drink: &Drink) -> String {
    format!(
        r#"<a class="drink-card" href="/detail?id={id}">
<div class="drink-images">{images}</div>
<div class="drink-info">
<h3>{name}</h3>
<p>Size: {size}</p>
<p class="drink-price">{price}</p>
<div class="drink-attributes">{attrs}</div>
</div>
</a>"#,
        id = drink.id,
        images = images_block(drink),
        name = escape_html(name_text(drink)),
        size = escape_html(drink.size.as_deref().unwrap_or("-")),
        price = price_text(drink.price),
        attrs = attribute_tags(&drink.attributes),
    )
}

fn page_href(page: usize, query: &str) -> String {
    if query.is_empty() {
        format!("/read?page={page}")
    } else {
        format!("/read?page={page}&q={}", urlencoding::encode(query))
    }
}

/// The list page: search box, one card per drink, prev/next navigation.
pub fn catalog_page(page: &CatalogPage, query: &str) -> String {
    let mut body = format!(
        r#"<h1>Drink catalog</h1>
<form method="get" action="/read">
<input type="search" name="q" placeholder="Search drinks..." value="{}">
<button type="submit">Search</button>
</form>
<div id="drinksList">"#,
        escape_html(query)
    );

    for drink in &page.items {
        body.push_str(&drink_card(drink));
    }
    if page.items.is_empty() {
        body.push_str("<p>No drinks to show.</p>");
    }
    body.push_str("</div>");

    let prev = if page.has_prev() {
        format!(
            r#"<a href="{}">Previous</a>"#,
            page_href(page.page - 1, query)
        )
    } else {
        "<span>Previous</span>".into()
    };
    let next = if page.has_next() {
        format!(r#"<a href="{}">Next</a>"#, page_href(page.page + 1, query))
    } else {
        "<span>Next</span>".into()
    };
    body.push_str(&format!(
        r#"<div class="pagination">{prev}<span id="pageInfo">Page {} of {}</span>{next}</div>"#,
        page.page, page.total_pages
    ));

    page_shell("Drink catalog", &body)
}

pub fn detail_page(drink: &Drink) -> String {
    let body = format!(
        r#"<div class="drink-detail-header">
<div class="drink-images">{images}</div>
<div class="drink-info">
<h1>{name}</h1>
<p><strong>Size:</strong> {size}</p>
<p class="drink-price">{price}</p>
<div class="drink-attributes">{attrs}</div>
</div>
</div>"#,
        images = images_block(drink),
        name = escape_html(name_text(drink)),
        size = escape_html(drink.size.as_deref().unwrap_or("-")),
        price = price_text(drink.price),
        attrs = attribute_tags(&drink.attributes),
    );
    page_shell(name_text(drink), &body)
}

pub fn detail_missing() -> String {
    page_shell("Not found", "<p>Drink not found</p>")
}

pub fn create_page() -> String {
    let body = r#"<h1>Add a drink</h1>
<form id="addDrinkForm" method="post" action="/create">
<p><label>Name <input type="text" name="name"></label></p>
<p><label>Size <input type="text" name="size"></label></p>
<p><label>Price (VND) <input type="number" name="price"></label></p>
<p><label>Attributes (JSON, e.g. [{"key":"ice","value":"Normal"}])
<textarea name="attributes">[]</textarea></label></p>
<button type="submit">Add drink</button>
</form>"#;
    page_shell("Add a drink", body)
}

/// Card picker shown when /update is opened without an id.
pub fn update_picker_page(drinks: &[Drink]) -> String {
    let mut body = String::from("<h1>Pick a drink to update</h1>");
    for drink in drinks {
        body.push_str(&format!(
            r#"<a class="drink-card" href="/update?id={id}">
<div class="drink-info"><h3>{name}</h3><p>Size: {size}</p><p class="drink-price">{price}</p></div>
</a>"#,
            id = drink.id,
            name = escape_html(name_text(drink)),
            size = escape_html(drink.size.as_deref().unwrap_or("-")),
            price = price_text(drink.price),
        ));
    }
    if drinks.is_empty() {
        body.push_str("<p>No drinks to update.</p>");
    }
    page_shell("Update a drink", &body)
}

/// Prefilled update form. Posts multipart so new images can be attached;
/// leaving the file input empty keeps the stored images.
pub fn update_form_page(drink: &Drink) -> String {
    let attributes_json =
        serde_json::to_string(&drink.attributes).unwrap_or_else(|_| "[]".into());
    let price = drink
        .price
        .map(|p| p.to_string())
        .unwrap_or_default();
    let body = format!(
        r#"<h1>Update {name}</h1>
<form id="updateDrinkForm" method="post" action="/update" enctype="multipart/form-data">
<input type="hidden" name="id" value="{id}">
<p><label>Name <input type="text" name="name" value="{name}"></label></p>
<p><label>Size <input type="text" name="size" value="{size}"></label></p>
<p><label>Price (VND) <input type="number" name="price" value="{price}"></label></p>
<p><label>Attributes (JSON) <textarea name="attributes">{attrs}</textarea></label></p>
<p><label>Replace images <input type="file" name="images" multiple accept="image/*"></label></p>
<button type="submit">Save</button>
</form>"#,
        id = drink.id,
        name = escape_html(name_text(drink)),
        size = escape_html(drink.size.as_deref().unwrap_or_default()),
        price = escape_html(&price),
        attrs = escape_html(&attributes_json),
    );
    page_shell("Update a drink", &body)
}

/// Delete page: every drink gets its own confirm-and-delete form.
pub fn delete_page(drinks: &[Drink]) -> String {
    let mut body = String::from("<h1>Delete a drink</h1>");
    for drink in drinks {
        body.push_str(&format!(
            r#"<div class="drink-card">
<div class="drink-info"><h3>{name}</h3><p>Size: {size}</p><p class="drink-price">{price}</p></div>
<form method="post" action="/delete" onsubmit="return confirm('Are you sure you want to delete this drink?');">
<input type="hidden" name="id" value="{id}">
<button type="submit">Delete</button>
</form>
</div>"#,
            id = drink.id,
            name = escape_html(name_text(drink)),
            size = escape_html(drink.size.as_deref().unwrap_or("-")),
            price = price_text(drink.price),
        ));
    }
    if drinks.is_empty() {
        body.push_str("<p>Nothing to delete.</p>");
    }
    page_shell("Delete a drink", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::state::CatalogPage;
    use uuid::Uuid;

    fn drink(name: &str) -> Drink {
        Drink {
            id: Uuid::new_v4(),
            name: Some(name.into()),
            size: Some("M".into()),
            price: Some(45000.0),
            images: vec!["/images/1-2.jpg".into()],
            attributes: vec![Attribute {
                key: "ice".into(),
                value: "Normal".into(),
            }],
        }
    }

    #[test]
    fn escapes_markup_in_interpolated_values() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );

        let d = drink("<script>evil</script>");
        let html = detail_page(&d);
        assert!(!html.contains("<script>evil"));
        assert!(html.contains("&lt;script&gt;evil"));
    }

    #[test]
    fn formats_vnd_with_dot_grouping() {
        assert_eq!(format_vnd(45000.0), "45.000 ₫");
        assert_eq!(format_vnd(0.0), "0 ₫");
        assert_eq!(format_vnd(999.0), "999 ₫");
        assert_eq!(format_vnd(1_234_567.0), "1.234.567 ₫");
        assert_eq!(format_vnd(-5000.0), "-5.000 ₫");
    }

    #[test]
    fn catalog_page_links_cards_to_detail() {
        let d = drink("Latte");
        let page = CatalogPage::build(std::slice::from_ref(&d), "", 1);
        let html = catalog_page(&page, "");
        assert!(html.contains(&format!("/detail?id={}", d.id)));
        assert!(html.contains("Page 1 of 1"));
        assert!(html.contains("45.000 ₫"));
    }

    #[test]
    fn pagination_disables_boundaries_and_keeps_the_query() {
        let drinks: Vec<Drink> = (0..25).map(|i| drink(&format!("Drink {i}"))).collect();
        let p2 = CatalogPage::build(&drinks, "drink", 2);
        let html = catalog_page(&p2, "drink");
        assert!(html.contains("/read?page=1&q=drink"));
        assert!(html.contains("/read?page=3&q=drink"));

        let p1 = CatalogPage::build(&drinks, "drink", 1);
        let html = catalog_page(&p1, "drink");
        assert!(!html.contains("/read?page=0"));
        assert!(html.contains("<span>Previous</span>"));
    }

    #[test]
    fn empty_images_render_placeholder_text() {
        let mut d = drink("Latte");
        d.images.clear();
        assert!(detail_page(&d).contains("No images available"));
    }

    #[test]
    fn update_form_prefills_attributes_as_json() {
        let d = drink("Latte");
        let html = update_form_page(&d);
        assert!(html.contains("&quot;key&quot;:&quot;ice&quot;"));
        assert!(html.contains(&d.id.to_string()));
    }
}
