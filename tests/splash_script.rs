//! Runs the inline load script against a minimal fake DOM to check the
//! one-shot transition from splash to gallery.

use boa_engine::{Context, JsValue, Source};
use gallerywall::page::splash::{client_script, ENTER_MS, EXIT_MS, ROOT_ID, SPLASH_ID, TEMPLATE_ID};

fn fake_dom(ready_state: &str) -> String {
    format!(
        r#"
var timers = [];
var mounts = 0;
function makeEl(id) {{
  return {{
    id: id, attrs: {{}}, className: "", children: [], parentNode: null,
    setAttribute: function (k, v) {{ this.attrs[k] = String(v); }},
    appendChild: function (c) {{ this.children.push(c); c.parentNode = this; return c; }},
    removeChild: function (c) {{
      var i = this.children.indexOf(c);
      if (i >= 0) {{ this.children.splice(i, 1); }}
      c.parentNode = null;
      return c;
    }}
  }};
}}
var body = makeEl("body");
var root = makeEl("{root}");
var tpl = makeEl("{template}");
tpl.content = {{ cloneNode: function (deep) {{ mounts += 1; return {{ fragment: true, deep: deep }}; }} }};
var splash = makeEl("{splash}");
body.appendChild(root);
body.appendChild(tpl);
body.appendChild(splash);
var els = {{}};
els["{root}"] = root;
els["{template}"] = tpl;
els["{splash}"] = splash;
var listeners = [];
var window = {{
  addEventListener: function (type, fn) {{ listeners.push({{ type: type, fn: fn }}); }},
  removeEventListener: function (type, fn) {{
    listeners = listeners.filter(function (l) {{ return !(l.type === type && l.fn === fn); }});
  }},
  setTimeout: function (fn, ms) {{ timers.push({{ fn: fn, ms: ms }}); return timers.length; }}
}};
var document = {{
  readyState: "{ready}",
  getElementById: function (id) {{ return els[id] || null; }}
}};
function fireLoad() {{
  var current = listeners.slice();
  for (var i = 0; i < current.length; i++) {{
    if (current[i].type === "load") {{ current[i].fn(); }}
  }}
}}
function runTimers() {{
  var pending = timers;
  timers = [];
  for (var i = 0; i < pending.length; i++) {{ pending[i].fn(); }}
}}
"#,
        root = ROOT_ID,
        template = TEMPLATE_ID,
        splash = SPLASH_ID,
        ready = ready_state,
    )
}

fn eval(ctx: &mut Context, code: &str) -> JsValue {
    match ctx.eval(Source::from_bytes(code.as_bytes())) {
        Ok(v) => v,
        Err(e) => panic!("script failed: {}\n{}", e, code),
    }
}

fn boot(ready_state: &str) -> Context {
    let mut ctx = Context::default();
    eval(&mut ctx, &fake_dom(ready_state));
    eval(&mut ctx, &client_script());
    ctx
}

fn truthy(ctx: &mut Context, expr: &str) -> bool {
    eval(ctx, expr).as_boolean().unwrap_or(false)
}

fn number(ctx: &mut Context, expr: &str) -> f64 {
    eval(ctx, expr).as_number().expect("number")
}

#[test]
fn waits_for_load_event() {
    let mut ctx = boot("loading");
    assert_eq!(number(&mut ctx, "listeners.length"), 1.0);
    assert_eq!(number(&mut ctx, "mounts"), 0.0);
    assert!(truthy(&mut ctx, "root.attrs['data-state'] === undefined"));

    eval(&mut ctx, "fireLoad()");
    assert_eq!(number(&mut ctx, "mounts"), 1.0);
    assert!(truthy(&mut ctx, "root.attrs['data-state'] === 'loaded'"));
    assert_eq!(number(&mut ctx, "listeners.length"), 0.0, "listener removes itself");
}

#[test]
fn transitions_exactly_once() {
    let mut ctx = boot("loading");
    eval(&mut ctx, "var handler = listeners[0].fn; fireLoad(); handler(); handler();");
    assert_eq!(number(&mut ctx, "mounts"), 1.0);
    assert!(truthy(&mut ctx, "root.attrs['data-state'] === 'loaded'"));
    assert_eq!(number(&mut ctx, "timers.length"), 2.0);
}

#[test]
fn already_complete_document_transitions_immediately() {
    let mut ctx = boot("complete");
    assert_eq!(number(&mut ctx, "listeners.length"), 0.0);
    assert_eq!(number(&mut ctx, "mounts"), 1.0);
    assert!(truthy(&mut ctx, "root.attrs['data-state'] === 'loaded'"));
}

#[test]
fn splash_fades_then_unmounts() {
    let mut ctx = boot("loading");
    eval(&mut ctx, "fireLoad()");
    assert!(truthy(&mut ctx, "splash.className.indexOf('loading-page-exit-active') >= 0"));
    assert!(truthy(&mut ctx, "splash.parentNode === body"));
    assert!(truthy(
        &mut ctx,
        &format!("timers.some(function (t) {{ return t.ms === {}; }})", EXIT_MS)
    ));
    assert!(truthy(
        &mut ctx,
        &format!("timers.some(function (t) {{ return t.ms === {}; }})", ENTER_MS)
    ));

    eval(&mut ctx, "runTimers()");
    assert!(truthy(&mut ctx, "splash.parentNode === null"));
    assert!(truthy(&mut ctx, "body.children.indexOf(splash) === -1"));
    assert!(truthy(&mut ctx, "root.className === 'loading-page-enter-done'"));
    assert!(truthy(&mut ctx, "root.attrs['data-state'] === 'loaded'"), "never reverts");
}

#[test]
fn empty_wall_still_leaves_the_splash() {
    // The script does not care how many tiles the template holds; an empty
    // template mounts nothing visible and the splash still goes away.
    let mut ctx = boot("loading");
    eval(&mut ctx, "tpl.content = { cloneNode: function () { mounts += 1; return { empty: true }; } };");
    eval(&mut ctx, "fireLoad(); runTimers();");
    assert_eq!(number(&mut ctx, "mounts"), 1.0);
    assert!(truthy(&mut ctx, "splash.parentNode === null"));
}
