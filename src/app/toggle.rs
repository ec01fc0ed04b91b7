/// 带文字的开关控件状态
///
/// `on` 是唯一的状态来源：界面勾选和代码调用都走 `handle_toggled`，
/// 文字总是重新同步，`on` 只在不一致时才写入。
#[derive(Debug, Clone)]
pub struct ToggleControl {
    on: bool,
    text: String,
    text_on: String,
    text_off: String,
}

impl ToggleControl {
    /// `text_on` 是开启时显示的文字（通常描述关闭操作）
    pub fn new(initial: bool, text_on: impl Into<String>, text_off: impl Into<String>) -> Self {
        let mut toggle = Self {
            on: !initial,
            text: String::new(),
            text_on: text_on.into(),
            text_off: text_off.into(),
        };
        toggle.handle_toggled(initial);
        toggle
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 状态切换的统一入口，返回 `on` 是否真的改变
    pub fn handle_toggled(&mut self, state: bool) -> bool {
        self.text = if state { self.text_on.clone() } else { self.text_off.clone() };
        if self.on != state {
            self.on = state;
            return true;
        }
        false
    }

    /// 绘制复选框，返回用户请求的新状态，由调用方交给 `handle_toggled`
    pub fn ui(&self, ui: &mut egui::Ui) -> Option<bool> {
        let mut state = self.on;
        ui.checkbox(&mut state, self.text.as_str()).changed().then_some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streaming_toggle(initial: bool) -> ToggleControl {
        ToggleControl::new(initial, "Disable infinite streaming data", "Enable infinite streaming data")
    }

    #[test]
    fn initial_state_sets_text() {
        let on = streaming_toggle(true);
        assert!(on.is_on());
        assert_eq!(on.text(), "Disable infinite streaming data");

        let off = streaming_toggle(false);
        assert!(!off.is_on());
        assert_eq!(off.text(), "Enable infinite streaming data");
    }

    #[test]
    fn toggling_updates_text_and_state() {
        let mut toggle = streaming_toggle(false);
        assert!(toggle.handle_toggled(true));
        assert!(toggle.is_on());
        assert_eq!(toggle.text(), "Disable infinite streaming data");
    }

    #[test]
    fn same_state_is_not_rewritten() {
        let mut toggle = streaming_toggle(true);
        assert!(!toggle.handle_toggled(true));
        assert!(toggle.is_on());
        assert_eq!(toggle.text(), "Disable infinite streaming data");
    }
}
