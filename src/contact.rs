use futures_util::future::{FutureExt, LocalBoxFuture};
use regex::Regex;
use std::{sync::LazyLock, time::Duration};
use thiserror::Error;

pub const SUBMIT_DELAY: Duration = Duration::from_millis(2_000);
pub const SUBMIT_LABEL: &str = "Enviar Mensagem";
pub const SENDING_LABEL: &str = "Enviando...";
pub const INVALID_FORM_MESSAGE: &str = "Por favor, corrija os erros antes de enviar.";
pub const SUCCESS_MESSAGE: &str = "Mensagem enviada com sucesso! Retornarei em breve.";

// Whitespace as browsers define it for `trim()` and regex `\s`. Unlike
// Unicode White_Space it includes U+FEFF and excludes U+0085.
const BLANK_CLASS: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let part = format!("[^{BLANK_CLASS}@]+");
    Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("email pattern compiles")
});

pub fn is_blank(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub fn trim_blank(value: &str) -> &str {
    value.trim_matches(is_blank)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    MinLength(usize),
    Email,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub message: &'static str,
}

impl Rule {
    /// `value` is expected to be trimmed already.
    pub fn accepts(&self, value: &str) -> bool {
        match self.kind {
            RuleKind::Required => !value.is_empty(),
            RuleKind::MinLength(min) => value.chars().count() >= min,
            RuleKind::Email => EMAIL_PATTERN.is_match(value),
        }
    }
}

const NAME_RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::Required,
        message: "Nome é obrigatório",
    },
    Rule {
        kind: RuleKind::MinLength(2),
        message: "Nome deve ter pelo menos 2 caracteres",
    },
];

const EMAIL_RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::Required,
        message: "Email é obrigatório",
    },
    Rule {
        kind: RuleKind::Email,
        message: "Email deve ter um formato válido",
    },
];

const SUBJECT_RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::Required,
        message: "Assunto é obrigatório",
    },
    Rule {
        kind: RuleKind::MinLength(3),
        message: "Assunto deve ter pelo menos 3 caracteres",
    },
];

const MESSAGE_RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::Required,
        message: "Mensagem é obrigatória",
    },
    Rule {
        kind: RuleKind::MinLength(10),
        message: "Mensagem deve ter pelo menos 10 caracteres",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Subject => 2,
            Self::Message => 3,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    pub fn error_id(self) -> String {
        format!("{}-error", self.id())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Nome",
            Self::Email => "Email",
            Self::Subject => "Assunto",
            Self::Message => "Mensagem",
        }
    }

    pub fn rules(self) -> &'static [Rule] {
        match self {
            Self::Name => NAME_RULES,
            Self::Email => EMAIL_RULES,
            Self::Subject => SUBJECT_RULES,
            Self::Message => MESSAGE_RULES,
        }
    }

    pub fn validate(self, raw: &str) -> Result<(), &'static str> {
        let value = trim_blank(raw);
        match self.rules().iter().find(|rule| !rule.accepts(value)) {
            Some(rule) => Err(rule.message),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }

    pub fn trimmed(&self) -> Self {
        Self {
            name: trim_blank(&self.name).to_string(),
            email: trim_blank(&self.email).to_string(),
            subject: trim_blank(&self.subject).to_string(),
            message: trim_blank(&self.message).to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: [Option<&'static str>; 4],
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.messages[field.index()]
    }

    pub fn record(&mut self, field: Field, result: Result<(), &'static str>) {
        self.messages[field.index()] = result.err();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.messages = [None; 4];
    }
}

pub fn validate_all(values: &ContactMessage) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in Field::ALL {
        errors.record(field, field.validate(values.get(field)));
    }
    errors
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("envio indisponível: {0}")]
    Unavailable(String),
}

pub trait SubmissionTransport {
    fn submit(&self, message: ContactMessage) -> LocalBoxFuture<'static, Result<(), SubmitError>>;
}

#[derive(Clone, Copy, Debug)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(SUBMIT_DELAY)
    }
}

impl SubmissionTransport for SimulatedTransport {
    fn submit(&self, message: ContactMessage) -> LocalBoxFuture<'static, Result<(), SubmitError>> {
        let delay = self.delay;
        async move {
            sleep(delay).await;
            log::info!(
                "simulated contact submission accepted ({} chars)",
                message.message.chars().count()
            );
            Ok(())
        }
        .boxed_local()
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(delay: Duration) {
    gloo_timers::future::sleep(delay).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(delay: Duration) {
    tokio::time::sleep(delay).await;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(FieldErrors),
    Sent,
    Failed(SubmitError),
}

impl SubmitOutcome {
    pub fn banner(&self) -> Banner {
        match self {
            Self::Invalid(_) => Banner::error(INVALID_FORM_MESSAGE),
            Self::Sent => Banner::success(SUCCESS_MESSAGE),
            Self::Failed(error) => Banner::error(error.to_string()),
        }
    }

    pub fn resets_form(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

pub async fn deliver(message: ContactMessage, transport: &dyn SubmissionTransport) -> SubmitOutcome {
    match transport.submit(message).await {
        Ok(()) => SubmitOutcome::Sent,
        Err(error) => {
            log::warn!("contact submission failed: {error}");
            SubmitOutcome::Failed(error)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Success => "#98c379",
            Self::Error => "#e06c75",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerPhase {
    Entering,
    Shown,
    Leaving,
}

impl BannerPhase {
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::Entering => 100,
            Self::Shown => 4_900,
            Self::Leaving => 300,
        }
    }

    /// `None` once the banner should be removed.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Entering => Some(Self::Shown),
            Self::Shown => Some(Self::Leaving),
            Self::Leaving => None,
        }
    }

    pub fn opacity(self) -> &'static str {
        match self {
            Self::Shown => "1",
            Self::Entering | Self::Leaving => "0",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveBanner {
    pub id: u32,
    pub banner: Banner,
    pub phase: BannerPhase,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub values: ContactMessage,
    pub errors: FieldErrors,
    pub sending: bool,
    pub banner: Option<ActiveBanner>,
    next_banner_id: u32,
}

impl ContactForm {
    pub fn input(&mut self, field: Field, value: String) {
        self.values.set(field, value);
    }

    pub fn validate_field(&mut self, field: Field) -> bool {
        let result = field.validate(self.values.get(field));
        self.errors.record(field, result);
        result.is_ok()
    }

    /// Validates every field. A valid form switches to sending and yields
    /// the trimmed message; an invalid one shows the generic error banner.
    pub fn begin_submit(&mut self) -> Option<ContactMessage> {
        if self.sending {
            return None;
        }

        self.errors = validate_all(&self.values);
        if !self.errors.is_empty() {
            let outcome = SubmitOutcome::Invalid(self.errors.clone());
            self.show_banner(outcome.banner());
            return None;
        }

        self.sending = true;
        Some(self.values.trimmed())
    }

    pub fn finish_submit(&mut self, outcome: SubmitOutcome) {
        self.sending = false;
        if outcome.resets_form() {
            self.values = ContactMessage::default();
            self.errors.clear();
        }
        self.show_banner(outcome.banner());
    }

    pub fn show_banner(&mut self, banner: Banner) -> u32 {
        self.next_banner_id = self.next_banner_id.wrapping_add(1);
        self.banner = Some(ActiveBanner {
            id: self.next_banner_id,
            banner,
            phase: BannerPhase::Entering,
        });
        self.next_banner_id
    }

    /// Moves banner `id` to its next phase. Timers of a replaced banner are
    /// ignored.
    pub fn advance_banner(&mut self, id: u32) {
        let Some(active) = self.banner.as_mut().filter(|active| active.id == id) else {
            return;
        };

        match active.phase.next() {
            Some(phase) => active.phase = phase,
            None => self.banner = None,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.sending {
            SENDING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Default)]
    struct RecordingTransport {
        sent: Rc<RefCell<Vec<ContactMessage>>>,
    }

    impl SubmissionTransport for RecordingTransport {
        fn submit(&self, message: ContactMessage) -> LocalBoxFuture<'static, Result<(), SubmitError>> {
            self.sent.borrow_mut().push(message);
            async { Ok(()) }.boxed_local()
        }
    }

    struct FailingTransport;

    impl SubmissionTransport for FailingTransport {
        fn submit(&self, _message: ContactMessage) -> LocalBoxFuture<'static, Result<(), SubmitError>> {
            async { Err(SubmitError::Unavailable("offline".to_string())) }.boxed_local()
        }
    }

    fn valid_message() -> ContactMessage {
        ContactMessage {
            name: "  Ana  ".to_string(),
            email: "ana@example.com".to_string(),
            subject: "Proposta".to_string(),
            message: "Olá, vamos conversar sobre um projeto?".to_string(),
        }
    }

    fn form_with(values: ContactMessage) -> ContactForm {
        ContactForm {
            values,
            ..ContactForm::default()
        }
    }

    #[test]
    fn first_failing_rule_wins() {
        assert_eq!(Field::Name.validate("   "), Err("Nome é obrigatório"));
        assert_eq!(
            Field::Name.validate(" a "),
            Err("Nome deve ter pelo menos 2 caracteres")
        );
        assert_eq!(Field::Name.validate("Al"), Ok(()));
    }

    #[test]
    fn email_rule_cases() {
        assert_eq!(Field::Email.validate(""), Err("Email é obrigatório"));
        assert_eq!(
            Field::Email.validate("ana@example"),
            Err("Email deve ter um formato válido")
        );
        assert_eq!(
            Field::Email.validate("ana @example.com"),
            Err("Email deve ter um formato válido")
        );
        assert_eq!(Field::Email.validate(" ana@example.com "), Ok(()));
    }

    #[test]
    fn whitespace_follows_browser_rules() {
        assert_eq!(Field::Name.validate("\u{FEFF}"), Err("Nome é obrigatório"));
        assert_eq!(Field::Name.validate("\u{FEFF}Al\u{3000}"), Ok(()));
        assert_eq!(
            Field::Email.validate("ana\u{FEFF}@example.com"),
            Err("Email deve ter um formato válido")
        );
        assert_eq!(Field::Email.validate("ana\u{0085}x@example.com"), Ok(()));
        assert_eq!(
            Field::Name.validate("\u{0085}"),
            Err("Nome deve ter pelo menos 2 caracteres")
        );
        assert_eq!(trim_blank("\u{A0}\tAna\u{2028}"), "Ana");
    }

    #[test]
    fn min_length_counts_characters() {
        assert_eq!(Field::Subject.validate("Olá"), Ok(()));
        assert!(Field::Message.validate("curta").is_err());
    }

    #[test]
    fn validate_all_reports_every_field() {
        let errors = validate_all(&ContactMessage::default());

        for field in Field::ALL {
            assert_eq!(errors.get(field), Some(field.rules()[0].message));
        }
        assert!(validate_all(&valid_message()).is_empty());
    }

    #[test]
    fn single_field_validation_only_touches_that_field() {
        let mut form = ContactForm::default();
        form.input(Field::Email, "nope".to_string());

        assert!(!form.validate_field(Field::Email));
        assert_eq!(form.errors.get(Field::Email), Some("Email deve ter um formato válido"));
        assert_eq!(form.errors.get(Field::Name), None);

        form.input(Field::Email, "a@b.co".to_string());
        assert!(form.validate_field(Field::Email));
        assert!(form.errors.is_empty());
    }

    #[test]
    fn invalid_submit_is_blocked_with_generic_banner() {
        let mut values = valid_message();
        values.email = "not-an-email".to_string();
        let mut form = form_with(values);

        assert_eq!(form.begin_submit(), None);
        assert!(!form.sending);
        assert_eq!(form.errors.get(Field::Email), Some("Email deve ter um formato válido"));
        let banner = form.banner.as_ref().map(|active| active.banner.clone());
        assert_eq!(banner, Some(Banner::error(INVALID_FORM_MESSAGE)));
    }

    #[tokio::test]
    async fn valid_submit_resets_form_after_delivery() {
        let transport = RecordingTransport::default();
        let mut form = form_with(valid_message());

        let message = form.begin_submit().expect("form is valid");
        assert!(form.sending);
        assert_eq!(form.submit_label(), SENDING_LABEL);
        assert_eq!(form.begin_submit(), None);

        let outcome = deliver(message, &transport).await;
        form.finish_submit(outcome);

        assert!(!form.sending);
        assert_eq!(form.submit_label(), SUBMIT_LABEL);
        assert_eq!(form.values, ContactMessage::default());
        assert!(form.errors.is_empty());
        let banner = form.banner.as_ref().map(|active| active.banner.clone());
        assert_eq!(banner, Some(Banner::success(SUCCESS_MESSAGE)));
        assert_eq!(transport.sent.borrow()[0].name, "Ana");
    }

    #[tokio::test]
    async fn transport_failure_keeps_values() {
        let mut form = form_with(valid_message());
        let message = form.begin_submit().expect("form is valid");

        form.finish_submit(deliver(message, &FailingTransport).await);

        assert_eq!(form.values, valid_message());
        let active = form.banner.expect("banner shown");
        assert_eq!(active.banner.kind, BannerKind::Error);
        assert_eq!(active.banner.message, "envio indisponível: offline");
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_transport_waits_before_succeeding() {
        let started = tokio::time::Instant::now();

        let result = SimulatedTransport::default().submit(valid_message()).await;

        assert_eq!(result, Ok(()));
        assert!(started.elapsed() >= SUBMIT_DELAY);
    }

    #[test]
    fn banner_lifecycle() {
        let mut phase = Some(BannerPhase::Entering);
        let mut total = 0;
        let mut opacities = Vec::new();
        while let Some(current) = phase {
            total += current.duration_ms();
            opacities.push(current.opacity());
            phase = current.next();
        }

        assert_eq!(total, 5_300);
        assert_eq!(opacities, vec!["0", "1", "0"]);
    }

    #[test]
    fn replaced_banner_ignores_old_timers() {
        let mut form = ContactForm::default();
        let first = form.show_banner(Banner::error("a"));
        let second = form.show_banner(Banner::success("b"));

        form.advance_banner(first);
        assert_eq!(form.banner.as_ref().map(|b| b.phase), Some(BannerPhase::Entering));

        for _ in 0..3 {
            form.advance_banner(second);
        }
        assert_eq!(form.banner, None);
    }

    proptest! {
        #[test]
        fn required_fails_iff_trimmed_empty(value in "\\PC*|[ \\t\\n]*") {
            let required = Rule { kind: RuleKind::Required, message: "" };
            prop_assert_eq!(!required.accepts(trim_blank(&value)), trim_blank(&value).is_empty());
        }

        #[test]
        fn email_rule_matches_pattern(value in "[a-z@. ]{0,12}|[a-z]{1,5}@[a-z]{1,5}\\.[a-z]{2,3}") {
            let email = Rule { kind: RuleKind::Email, message: "" };
            let parts: Vec<&str> = value.split('@').collect();
            let expected = parts.len() == 2
                && !parts[0].is_empty()
                && !parts[0].contains(is_blank)
                && !parts[1].contains(is_blank)
                && parts[1]
                    .char_indices()
                    .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < parts[1].len());
            prop_assert_eq!(email.accepts(&value), expected);
        }

        #[test]
        fn valid_forms_always_start_sending(
            name in "[A-Za-z]{2,20}",
            user in "[a-z]{1,8}",
            domain in "[a-z]{1,8}",
            subject in "[A-Za-z ]{0,10}[A-Za-z]{3}",
            message in "[A-Za-z ]{0,30}[A-Za-z]{10}",
        ) {
            let mut form = form_with(ContactMessage {
                name,
                email: format!("{user}@{domain}.com"),
                subject,
                message,
            });

            prop_assert!(form.begin_submit().is_some());
            prop_assert!(form.banner.is_none());
            form.finish_submit(SubmitOutcome::Sent);
            prop_assert_eq!(form.values, ContactMessage::default());
        }
    }
}
