// page.rs — The reshare landing page.
//
// One self-contained HTML document: a meta-refresh that immediately
// opens the mailto URI, plus a visible button for clients that block
// mailto auto-navigation. No scripts beyond the button's onclick, no
// external assets that could break in a sandboxed email webview.

/// Render the landing page around a composed mailto URI.
pub(crate) fn render_page(mailto: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta http-equiv="refresh" content="0; URL='{mailto}'" />
    <style>
      body {{
        margin: 0;
      }}
      .backdrop {{
        width: 100%;
        height: 100vh;
        display: flex;
        flex-direction: column;
        justify-content: center;
        align-items: center;
        background-color: #18191b;
      }}
      .headline {{
        font-size: 40px;
        color: #ffffff;
        margin-bottom: 64px;
        font-family: sans-serif;
      }}
      .forward {{
        width: 200px;
        height: 80px;
        font-size: 22px;
        color: #ffffff;
        background-color: #2e7d32;
        border: none;
        cursor: pointer;
      }}
      .forward:hover {{
        background-color: #1b5e20;
      }}
    </style>
  </head>
  <body>
    <div class="backdrop">
      <h1 class="headline">Click to share with your network</h1>
      <button class="forward" onclick="location.href='{mailto}';">Share</button>
    </div>
  </body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_redirects_and_offers_a_button() {
        let html = render_page("mailto:?bcc=share%2Btx9%40redb.ai");
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("URL='mailto:?bcc=share%2Btx9%40redb.ai'"));
        assert!(html.contains("onclick=\"location.href='mailto:?bcc=share%2Btx9%40redb.ai';\""));
    }
}
