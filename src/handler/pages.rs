//! Landing page module
//!
//! The viewer shell is a fixed HTML document compiled into the binary; the
//! actual rendering lives in the static JS assets it references.

/// Viewer landing page
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Protein Structure Viewer</title>
    <link rel="icon" type="image/svg+xml" href="/favicon.svg">
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }
        html, body {
            height: 100%;
            overflow: hidden;
            background: #0b1020;
            color: #e5e7eb;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        }
        #glCanvas {
            display: block;
            width: 100%;
            height: 100%;
        }
        .hud {
            position: fixed;
            top: 16px;
            left: 16px;
            padding: 14px 18px;
            background: rgba(17, 24, 39, 0.8);
            border: 1px solid rgba(255, 255, 255, 0.12);
            border-radius: 12px;
            backdrop-filter: blur(8px);
            max-width: 320px;
        }
        .hud h1 {
            font-size: 1.1em;
            font-weight: 600;
            margin-bottom: 6px;
        }
        .hud p {
            font-size: 0.85em;
            opacity: 0.75;
            line-height: 1.5;
        }
        .hud code {
            color: #4ade80;
            font-size: 0.9em;
        }
        .controls {
            margin-top: 10px;
            display: flex;
            gap: 8px;
        }
        .controls label {
            font-size: 0.8em;
            display: flex;
            align-items: center;
            gap: 4px;
        }
    </style>
</head>
<body>
    <canvas id="glCanvas"></canvas>
    <div class="hud">
        <h1>Protein Structure Viewer</h1>
        <p>Structures are served from <code>/protein/&lt;filename&gt;</code>.
           Drag to rotate, scroll to zoom.</p>
        <div class="controls">
            <label><input type="checkbox" id="toggleAtoms" checked> Atoms</label>
            <label><input type="checkbox" id="toggleBonds" checked> Bonds</label>
        </div>
    </div>
    <script src="/static/js/main.js"></script>
</body>
</html>"#;
