use gallery_core::{display_name, is_empty, ImageEntry};
use serde::Serialize;

/// An image as the page shows it.
#[derive(Debug, Clone, Serialize)]
pub struct ImageCard {
    pub name: String,
    pub url: String,
    pub display_name: String,
}

impl From<&ImageEntry> for ImageCard {
    fn from(entry: &ImageEntry) -> Self {
        Self {
            name: entry.name.clone(),
            url: entry.url.clone(),
            display_name: display_name(&entry.name).to_string(),
        }
    }
}

pub fn cards(images: &[ImageEntry]) -> Vec<ImageCard> {
    images.iter().map(ImageCard::from).collect()
}

/// The card grid, or the empty state when there is nothing to show.
pub fn render_grid(images: &[ImageEntry]) -> String {
    if is_empty(images) {
        return r#"<h3 class="empty">😐 No Images Found 😐</h3>"#.to_string();
    }

    images
        .iter()
        .map(|image| {
            format!(
                r#"<div class="card">
                <img src="{url}" alt="{display_name}" loading="lazy">
                <h3>{display_name}</h3>
                <button class="del" type="button" data-name="{name}" title="Delete">&#128465;</button>
            </div>"#,
                url = html_escape(&image.url),
                display_name = html_escape(display_name(&image.name)),
                name = html_escape(&image.name),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The single gallery page. `alert` is shown once on load, e.g. for missing credentials.
pub fn render_page(images: &[ImageEntry], alert: Option<&str>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Image Gallery</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}

        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            background: #ffffff;
            color: #333;
            line-height: 1.6;
        }}

        .container {{
            max-width: 1400px;
            margin: 0 auto;
            padding: 40px 20px;
        }}

        h2 {{
            font-size: 2rem;
            font-weight: 300;
            text-align: center;
            padding-bottom: 20px;
            border-bottom: 1px solid #eee;
        }}

        .upload-form {{
            display: flex;
            flex-wrap: wrap;
            justify-content: center;
            align-items: center;
            gap: 20px;
            padding: 30px 0;
        }}

        .display-img {{
            width: 200px;
            height: 200px;
            object-fit: cover;
            border-radius: 4px;
            background: #f5f5f5;
        }}

        .placeholder {{
            display: flex;
            align-items: center;
            justify-content: center;
            color: #999;
            font-size: 0.9rem;
        }}

        .upload-form label,
        .upload-form button {{
            padding: 12px 20px;
            border: 1px solid #333;
            background: #fff;
            cursor: pointer;
            font-size: 1rem;
            border-radius: 4px;
        }}

        .grid {{
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
            gap: 15px;
        }}

        .card {{
            position: relative;
            background: #f5f5f5;
            border-radius: 4px;
            padding-bottom: 10px;
            transition: transform 0.2s ease;
        }}

        .card:hover {{
            transform: translateY(-4px);
            box-shadow: 0 8px 20px rgba(0,0,0,0.1);
        }}

        .card img {{
            display: block;
            width: 100%;
            height: 240px;
            object-fit: cover;
            border-radius: 4px 4px 0 0;
        }}

        .card h3 {{
            width: 90%;
            margin: 10px auto 0;
            font-size: 1rem;
            font-weight: 400;
            overflow-wrap: anywhere;
        }}

        .del {{
            position: absolute;
            top: 8px;
            right: 8px;
            background: rgba(255, 255, 255, 0.9);
            border: none;
            width: 36px;
            height: 36px;
            cursor: pointer;
            font-size: 1.2rem;
            border-radius: 4px;
        }}

        .empty {{
            grid-column: 1 / -1;
            text-align: center;
            color: #666;
            font-weight: 300;
        }}

        .loading {{
            display: none;
            position: fixed;
            top: 0;
            left: 0;
            width: 100%;
            height: 100%;
            background: rgba(255, 255, 255, 0.8);
            z-index: 1000;
            align-items: center;
            justify-content: center;
        }}

        .loading.active {{
            display: flex;
        }}

        .spinner {{
            width: 48px;
            height: 48px;
            border: 4px solid #ddd;
            border-top-color: #333;
            border-radius: 50%;
            animation: spin 0.8s linear infinite;
        }}

        @keyframes spin {{
            to {{ transform: rotate(360deg); }}
        }}

        @media (max-width: 768px) {{
            .grid {{
                grid-template-columns: 1fr;
            }}
        }}
    </style>
</head>
<body>
    <div class="loading" id="loading"><div class="spinner"></div></div>

    <div class="container">
        <h2>📸 Image Gallery 📸</h2>

        <form class="upload-form" id="upload-form">
            <img class="display-img" id="preview" alt="preview" hidden>
            <div class="display-img placeholder" id="placeholder">No image selected</div>
            <label for="file-input">Choose image</label>
            <input type="file" id="file-input" name="file" accept="image/*" hidden>
            <button type="submit">Upload</button>
        </form>

        <div class="grid" id="grid">
            {grid}
        </div>
    </div>

    <script>
        const startupAlert = {alert_json};
        const grid = document.getElementById('grid');
        const loading = document.getElementById('loading');
        const fileInput = document.getElementById('file-input');
        const preview = document.getElementById('preview');
        const placeholder = document.getElementById('placeholder');

        async function call(method, url, body) {{
            loading.classList.add('active');
            try {{
                const response = await fetch(url, {{ method, body }});
                if (!response.ok) {{
                    console.error(`${{method}} ${{url}} failed: ${{response.status}}`);
                    return;
                }}
                const data = await response.json();
                grid.innerHTML = data.grid;
                if (data.alert) alert(data.alert);
            }} catch (error) {{
                console.error(error);
            }} finally {{
                loading.classList.remove('active');
            }}
        }}

        function blobPath(name) {{
            return name.split('/').map(encodeURIComponent).join('/');
        }}

        fileInput.addEventListener('change', () => {{
            const file = fileInput.files[0];
            if (preview.src) URL.revokeObjectURL(preview.src);
            if (file) {{
                preview.src = URL.createObjectURL(file);
                preview.hidden = false;
                placeholder.hidden = true;
            }} else {{
                preview.removeAttribute('src');
                preview.hidden = true;
                placeholder.hidden = false;
            }}
        }});

        document.getElementById('upload-form').addEventListener('submit', (e) => {{
            e.preventDefault();
            const body = new FormData();
            if (fileInput.files[0]) body.append('file', fileInput.files[0]);
            call('POST', '/api/images', body);
        }});

        grid.addEventListener('click', (e) => {{
            const button = e.target.closest('.del');
            if (button) call('DELETE', `/api/images/${{blobPath(button.dataset.name)}}`);
        }});

        if (startupAlert) {{
            alert(startupAlert);
        }} else {{
            call('GET', '/api/images');
        }}
    </script>
</body>
</html>"#,
        grid = render_grid(images),
        alert_json = serde_json::to_string(&alert).unwrap_or_else(|_| "null".to_string()),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
