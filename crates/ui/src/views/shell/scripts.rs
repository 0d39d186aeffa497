/// Installs or removes the `beforeunload` confirmation on the webview.
///
/// Reinstalling replaces the previous listener, so the script is safe to run
/// on every lock change.
pub(super) fn leave_guard_script(prompt: Option<&str>) -> String {
    let locked = prompt.is_some();
    let prompt = prompt.unwrap_or_default();
    format!(
        r#"(function() {{
                    const locked = {locked};
                    const prompt = {prompt:?};
                    if (window.__campusLeaveGuard) {{
                        window.removeEventListener("beforeunload", window.__campusLeaveGuard);
                        window.__campusLeaveGuard = null;
                    }}
                    if (!locked) {{
                        return;
                    }}
                    window.__campusLeaveGuard = (event) => {{
                        event.preventDefault();
                        event.returnValue = prompt;
                        return prompt;
                    }};
                    window.addEventListener("beforeunload", window.__campusLeaveGuard);
                }})();"#,
    )
}
