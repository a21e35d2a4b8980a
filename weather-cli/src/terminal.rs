use std::{
    io::{self, Write},
    sync::{Mutex, PoisonError},
};

use weather_core::{Severity, View, WeatherCard};

/// Prints status lines and the results block to a writer.
///
/// Output already on screen can't be hidden, so the card is buffered by
/// `render` and only printed when the results region becomes visible.
pub struct TerminalView {
    out: Mutex<Box<dyn Write + Send>>,
    card: Mutex<Option<WeatherCard>>,
}

impl TerminalView {
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            card: Mutex::new(None),
        }
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl View for TerminalView {
    fn render(&self, card: &WeatherCard) {
        *self.card.lock().unwrap_or_else(PoisonError::into_inner) = Some(card.clone());
    }

    fn set_status(&self, text: &str, severity: Severity) {
        if text.is_empty() {
            return;
        }
        match severity {
            Severity::Info => self.write(&format!("{text}\n")),
            Severity::Error => self.write(&format!("Erro: {text}\n")),
        }
    }

    fn set_visible(&self, visible: bool) {
        let card = self.card.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let (true, Some(card)) = (visible, card) {
            self.write(&card_block(&card));
        }
    }
}

/// Labels left-aligned to the widest one, one field per line.
fn card_block(card: &WeatherCard) -> String {
    let fields = card.fields();
    let width = fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut block = String::from("\n");
    for (label, value) in fields {
        block.push_str(&format!("  {label:<width$}  {value}\n"));
    }
    block.push('\n');
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Writer handle whose contents stay readable after being boxed.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn card() -> WeatherCard {
        WeatherCard {
            location: "São Paulo, SP - Brazil".into(),
            observed_at: "01/05 14:30".into(),
            temperature: "22°C".into(),
            condition: "Nublado".into(),
            wind: "9 km/h (135°)".into(),
            humidity: "81%".into(),
            apparent_temperature: "20°C".into(),
            pressure: "1015 hPa".into(),
            precipitation: "0 mm".into(),
            cloud_cover: "100%".into(),
        }
    }

    #[test]
    fn card_is_printed_only_when_visible() {
        let buf = SharedBuf::default();
        let view = TerminalView::new(Box::new(buf.clone()));

        view.render(&card());
        assert_eq!(buf.contents(), "");

        view.set_visible(true);
        let out = buf.contents();
        assert!(out.contains("Local             São Paulo, SP - Brazil"), "{out}");
        assert!(out.contains("Temperatura       22°C"), "{out}");
        assert!(out.contains("Sensação térmica  20°C"), "{out}");
        assert_eq!(out.lines().filter(|l| !l.is_empty()).count(), 10);
    }

    #[test]
    fn hidden_card_is_discarded() {
        let buf = SharedBuf::default();
        let view = TerminalView::new(Box::new(buf.clone()));

        view.render(&card());
        view.set_visible(false);
        view.set_visible(true);

        assert_eq!(buf.contents(), "");
    }

    #[test]
    fn statuses_are_printed_with_severity() {
        let buf = SharedBuf::default();
        let view = TerminalView::new(Box::new(buf.clone()));

        view.set_status("Buscando cidade...", Severity::Info);
        view.set_status("", Severity::Info);
        view.set_status("Cidade não encontrada: Atlantis", Severity::Error);

        assert_eq!(
            buf.contents(),
            "Buscando cidade...\nErro: Cidade não encontrada: Atlantis\n"
        );
    }
}
