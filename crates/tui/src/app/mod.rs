use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use api_types::{
    account::Account,
    card::Card,
    transaction::{Transaction, TransactionNew},
};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
    validate::{self, ValidationError},
};

/// Display window for the dashboard's transaction list. The server is not
/// asked for a smaller page; the list is truncated after the fetch.
const RECENT_TRANSACTIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Register,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Deposit,
    Cards,
    Pay,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Summary,
        Section::Deposit,
        Section::Cards,
        Section::Pay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Deposit => "Deposit",
            Self::Cards => "Cards",
            Self::Pay => "Pay",
        }
    }

    fn next(self) -> Section {
        match self {
            Self::Summary => Self::Deposit,
            Self::Deposit => Self::Cards,
            Self::Cards => Self::Pay,
            Self::Pay => Self::Summary,
        }
    }

    fn prev(self) -> Section {
        match self {
            Self::Summary => Self::Pay,
            Self::Deposit => Self::Summary,
            Self::Cards => Self::Deposit,
            Self::Pay => Self::Cards,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterField {
    #[default]
    Name,
    Email,
}

#[derive(Debug, Default)]
pub struct RegisterState {
    pub name: String,
    pub email: String,
    pub focus: RegisterField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl RegisterState {
    /// Submit is possible once the name survives trimming and the email has
    /// a plausible shape. Checked again defensively at submit time.
    pub fn can_submit(&self) -> bool {
        validate::required(&self.name).is_ok() && validate::email(&self.email).is_ok()
    }

    fn advance_focus(&mut self) {
        self.focus = match self.focus {
            RegisterField::Name => RegisterField::Email,
            RegisterField::Email => RegisterField::Name,
        };
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            RegisterField::Name => &mut self.name,
            RegisterField::Email => &mut self.email,
        }
    }
}

/// Read-only dashboard data. Everything here is replaced wholesale by the
/// latest fetch; nothing is edited in place.
#[derive(Debug, Default)]
pub struct SummaryState {
    pub account: Option<Account>,
    pub cards: Vec<Card>,
    /// Most recent transactions, newest first.
    pub transactions: Vec<Transaction>,
    pub error: Option<String>,
    seen_token: Option<u64>,
}

#[derive(Debug, Default)]
pub struct DepositState {
    pub amount: String,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct CardsState {
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CardOption {
    pub id: i64,
    pub last4: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayField {
    #[default]
    Card,
    Merchant,
    Mcc,
    Amount,
}

#[derive(Debug, Default)]
pub struct PayState {
    pub merchant: String,
    pub mcc: String,
    pub amount: String,
    /// Selectable cards, re-fetched whenever the refresh token moves so a
    /// freshly issued card becomes selectable.
    pub options: Vec<CardOption>,
    pub selected: Option<i64>,
    pub focus: PayField,
    pub error: Option<String>,
    /// Outcome of the last submitted transaction, approved or declined.
    pub result: Option<Transaction>,
    seen_token: Option<u64>,
}

impl PayState {
    /// Validates in a fixed order, stopping at the first failure: card,
    /// merchant, category code, amount.
    pub fn draft(&self) -> std::result::Result<TransactionNew, ValidationError> {
        let card_id = self.selected.ok_or(ValidationError::MissingCard)?;
        let merchant = self.merchant.trim();
        if merchant.is_empty() {
            return Err(ValidationError::MissingMerchant);
        }
        validate::mcc_complete(&self.mcc)?;
        let amount_cents = validate::parse_amount_cents(&self.amount)?;
        Ok(TransactionNew {
            card_id,
            merchant: merchant.to_string(),
            mcc: self.mcc.clone(),
            amount_cents,
        })
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
            .and_then(|id| self.options.iter().position(|option| option.id == id))
    }

    fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let next = match self.selected_index() {
            None => 0,
            Some(index) => (index + 1).min(self.options.len() - 1),
        };
        self.selected = Some(self.options[next].id);
    }

    fn select_prev(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let prev = self.selected_index().map_or(0, |index| index.saturating_sub(1));
        self.selected = Some(self.options[prev].id);
    }

    fn advance_focus(&mut self) {
        self.focus = match self.focus {
            PayField::Card => PayField::Merchant,
            PayField::Merchant => PayField::Mcc,
            PayField::Mcc => PayField::Amount,
            PayField::Amount => PayField::Card,
        };
    }

    fn input(&mut self, ch: char) {
        match self.focus {
            PayField::Card => {}
            PayField::Merchant => self.merchant.push(ch),
            PayField::Mcc => validate::push_mcc_char(&mut self.mcc, ch),
            PayField::Amount => {
                if validate::push_amount_char(&mut self.amount, ch) {
                    self.error = None;
                }
            }
        }
    }

    fn backspace(&mut self) {
        match self.focus {
            PayField::Card => {}
            PayField::Merchant => {
                self.merchant.pop();
            }
            PayField::Mcc => {
                self.mcc.pop();
            }
            PayField::Amount => {
                self.amount.pop();
            }
        }
    }

    fn reset_form(&mut self) {
        self.merchant.clear();
        self.mcc.clear();
        self.amount.clear();
        self.selected = None;
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub section: Section,
    /// Active account identity. Set once, on successful registration, and
    /// never changed for the rest of the session.
    pub account_id: Option<i64>,
    /// Monotonic token bumped by every successful mutation. A view holding
    /// an older token re-fetches; nothing else triggers a re-fetch.
    pub refresh_counter: u64,
    pub register: RegisterState,
    pub summary: SummaryState,
    pub deposit: DepositState,
    pub cards: CardsState,
    pub pay: PayState,
}

impl AppState {
    fn new() -> Self {
        Self {
            screen: Screen::Register,
            section: Section::Summary,
            account_id: None,
            refresh_counter: 0,
            register: RegisterState::default(),
            summary: SummaryState::default(),
            deposit: DepositState::default(),
            cards: CardsState::default(),
            pay: PayState::default(),
        }
    }

    /// One-way transition from guest to an active account. Later calls are
    /// ignored.
    pub fn adopt_account(&mut self, id: i64) {
        if self.account_id.is_some() {
            return;
        }
        self.account_id = Some(id);
        self.screen = Screen::Home;
    }

    /// Bumps the shared refresh token by exactly one.
    pub fn advance_refresh(&mut self) {
        self.refresh_counter += 1;
    }
}

pub struct App {
    client: Client,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        Ok(Self {
            client,
            state: AppState::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.refresh_stale().await;

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Token-based refresh: each subscriber remembers the token it last
    /// fetched under and re-fetches when the shared token has moved past it.
    async fn refresh_stale(&mut self) {
        let Some(account_id) = self.state.account_id else {
            return;
        };
        let token = self.state.refresh_counter;
        if self.state.summary.seen_token != Some(token) {
            self.load_summary(account_id, token).await;
        }
        if self.state.pay.seen_token != Some(token) {
            self.load_card_options(account_id, token).await;
        }
    }

    /// Fetches in a fixed order (account, cards, transactions). Each result
    /// lands in its own slot, so a later failure keeps earlier data fresh
    /// and a failure anywhere leaves previously shown data on screen.
    async fn load_summary(&mut self, account_id: i64, token: u64) {
        let mut error = None;

        match self.client.account_get(account_id).await {
            Ok(account) => self.state.summary.account = Some(account),
            Err(err) => error = Some(flow_message(err)),
        }
        match self.client.cards_list(account_id).await {
            Ok(cards) => self.state.summary.cards = cards,
            Err(err) => error = Some(flow_message(err)),
        }
        match self.client.transactions_list(account_id).await {
            Ok(mut transactions) => {
                transactions.truncate(RECENT_TRANSACTIONS);
                self.state.summary.transactions = transactions;
            }
            Err(err) => error = Some(flow_message(err)),
        }

        // No retry: the view settles on this token even when a fetch failed.
        self.state.summary.error = error;
        self.state.summary.seen_token = Some(token);
    }

    async fn load_card_options(&mut self, account_id: i64, token: u64) {
        match self.client.cards_list(account_id).await {
            Ok(cards) => {
                self.state.pay.options = cards
                    .into_iter()
                    .map(|card| CardOption {
                        id: card.id,
                        last4: card.last4_digits,
                    })
                    .collect();
            }
            Err(err) => {
                // The form's error line is reserved for submit failures;
                // stale options stay selectable.
                tracing::warn!(error = %flow_message(err), "card option fetch failed");
            }
        }
        self.state.pay.seen_token = Some(token);
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match ui::keymap::map_key(key) {
            AppAction::Quit => self.should_quit = true,
            action => match self.state.screen {
                Screen::Register => self.handle_register_action(action).await?,
                Screen::Home => self.handle_home_action(action).await?,
            },
        }
        Ok(())
    }

    async fn handle_register_action(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::NextField => self.state.register.advance_focus(),
            AppAction::Submit => self.submit_register().await?,
            AppAction::Backspace => {
                self.state.register.active_field_mut().pop();
            }
            AppAction::Input(ch) => self.state.register.active_field_mut().push(ch),
            AppAction::Cancel => self.state.register.error = None,
            _ => {}
        }
        Ok(())
    }

    async fn handle_home_action(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::PrevSection => self.state.section = self.state.section.prev(),
            AppAction::NextSection => self.state.section = self.state.section.next(),
            AppAction::Cancel => self.clear_section_feedback(),
            action => match self.state.section {
                Section::Summary => {}
                Section::Deposit => self.handle_deposit_action(action).await?,
                Section::Cards => self.handle_cards_action(action).await?,
                Section::Pay => self.handle_pay_action(action).await?,
            },
        }
        Ok(())
    }

    async fn handle_deposit_action(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::Input(ch) => {
                if validate::push_amount_char(&mut self.state.deposit.amount, ch) {
                    self.state.deposit.error = None;
                }
            }
            AppAction::Backspace => {
                self.state.deposit.amount.pop();
            }
            AppAction::Submit => self.submit_deposit().await?,
            _ => {}
        }
        Ok(())
    }

    async fn handle_cards_action(&mut self, action: AppAction) -> Result<()> {
        if action == AppAction::Submit {
            self.submit_issue().await?;
        }
        Ok(())
    }

    async fn handle_pay_action(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::NextField => self.state.pay.advance_focus(),
            AppAction::Up => {
                if self.state.pay.focus == PayField::Card {
                    self.state.pay.select_prev();
                }
            }
            AppAction::Down => {
                if self.state.pay.focus == PayField::Card {
                    self.state.pay.select_next();
                }
            }
            AppAction::Backspace => self.state.pay.backspace(),
            AppAction::Input(ch) => self.state.pay.input(ch),
            AppAction::Submit => self.submit_pay().await?,
            _ => {}
        }
        Ok(())
    }

    fn clear_section_feedback(&mut self) {
        match self.state.section {
            Section::Summary => self.state.summary.error = None,
            Section::Deposit => self.state.deposit.error = None,
            Section::Cards => self.state.cards.error = None,
            Section::Pay => {
                self.state.pay.error = None;
                self.state.pay.result = None;
            }
        }
    }

    async fn submit_register(&mut self) -> Result<()> {
        if self.state.register.submitting {
            return Ok(());
        }
        self.state.register.error = None;
        if !self.state.register.can_submit() {
            self.state.register.error =
                Some("Please enter your name and a valid email address.".to_string());
            return Ok(());
        }

        self.state.register.submitting = true;
        let email = self.state.register.email.trim().to_string();
        let name = self.state.register.name.trim().to_string();
        let outcome = self.client.account_create(&email, &name).await;
        self.state.register.submitting = false;

        match outcome {
            Ok(account) => {
                tracing::info!(account_id = account.id, "account registered");
                self.state.adopt_account(account.id);
            }
            Err(err) => self.state.register.error = Some(flow_message(err)),
        }
        Ok(())
    }

    async fn submit_deposit(&mut self) -> Result<()> {
        let Some(account_id) = self.state.account_id else {
            return Ok(());
        };
        self.state.deposit.error = None;

        let cents = match validate::parse_amount_cents(&self.state.deposit.amount) {
            Ok(cents) => cents,
            Err(err) => {
                // The raw text is discarded on a failed parse, not just
                // rejected.
                self.state.deposit.amount.clear();
                self.state.deposit.error = Some(err.to_string());
                return Ok(());
            }
        };

        // The returned account snapshot is ignored on purpose; the dashboard
        // re-fetches it under the new refresh token.
        match self.client.deposit(account_id, cents).await {
            Ok(_) => {
                self.state.deposit.amount.clear();
                self.state.advance_refresh();
            }
            Err(err) => {
                self.state.deposit.amount.clear();
                self.state.deposit.error = Some(flow_message(err));
            }
        }
        Ok(())
    }

    async fn submit_issue(&mut self) -> Result<()> {
        let Some(account_id) = self.state.account_id else {
            return Ok(());
        };
        // Any per-account card limit is server policy; a rejection surfaces
        // here like any other failure.
        match self.client.card_issue(account_id).await {
            Ok(_) => {
                self.state.cards.error = None;
                self.state.advance_refresh();
            }
            Err(err) => self.state.cards.error = Some(flow_message(err)),
        }
        Ok(())
    }

    async fn submit_pay(&mut self) -> Result<()> {
        let Some(account_id) = self.state.account_id else {
            return Ok(());
        };
        self.state.pay.error = None;
        self.state.pay.result = None;

        let draft = match self.state.pay.draft() {
            Ok(draft) => draft,
            Err(err) => {
                if err == ValidationError::InvalidAmount {
                    self.state.pay.amount.clear();
                }
                self.state.pay.error = Some(err.to_string());
                return Ok(());
            }
        };

        match self.client.transaction_create(account_id, &draft).await {
            Ok(transaction) => {
                // Declines land here too: the server may have recorded the
                // attempt, so the refresh still fires.
                self.state.pay.result = Some(transaction);
                self.state.pay.reset_form();
                self.state.advance_refresh();
            }
            Err(err) => {
                self.state.pay.amount.clear();
                self.state.pay.error = Some(flow_message(err));
            }
        }
        Ok(())
    }
}

/// User-facing message for a failed client call. Server-provided text is
/// shown verbatim; transport failures get a generic line.
fn flow_message(err: ClientError) -> String {
    match err {
        ClientError::NotFound(message)
        | ClientError::Invalid(message)
        | ClientError::Server(message) => message,
        ClientError::Transport(err) => format!("Cannot reach the server: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_is_adopted_once() {
        let mut state = AppState::new();
        assert_eq!(state.screen, Screen::Register);
        state.adopt_account(7);
        assert_eq!(state.account_id, Some(7));
        assert_eq!(state.screen, Screen::Home);
        state.adopt_account(9);
        assert_eq!(state.account_id, Some(7));
    }

    #[test]
    fn refresh_token_advances_by_one() {
        let mut state = AppState::new();
        assert_eq!(state.refresh_counter, 0);
        state.advance_refresh();
        state.advance_refresh();
        assert_eq!(state.refresh_counter, 2);
    }

    #[test]
    fn register_gate_requires_name_and_shaped_email() {
        let mut register = RegisterState::default();
        assert!(!register.can_submit());
        register.name = "  Ada Lovelace ".to_string();
        register.email = "ada@example".to_string();
        assert!(!register.can_submit());
        register.email = "ada@example.com".to_string();
        assert!(register.can_submit());
    }

    #[test]
    fn pay_draft_validates_in_order() {
        let mut pay = PayState::default();
        pay.options = vec![CardOption {
            id: 1,
            last4: "0042".to_string(),
        }];
        assert_eq!(pay.draft().unwrap_err(), ValidationError::MissingCard);
        pay.selected = Some(1);
        assert_eq!(pay.draft().unwrap_err(), ValidationError::MissingMerchant);
        pay.merchant = "CVS Pharmacy".to_string();
        pay.mcc = "59".to_string();
        assert_eq!(pay.draft().unwrap_err(), ValidationError::InvalidCategoryCode);
        pay.mcc = "5912".to_string();
        pay.amount = "0".to_string();
        assert_eq!(pay.draft().unwrap_err(), ValidationError::InvalidAmount);
        pay.amount = "12.5".to_string();

        let draft = pay.draft().unwrap();
        assert_eq!(draft.card_id, 1);
        assert_eq!(draft.merchant, "CVS Pharmacy");
        assert_eq!(draft.mcc, "5912");
        assert_eq!(draft.amount_cents, 1250);
    }

    #[test]
    fn card_selection_walks_the_options() {
        let mut pay = PayState::default();
        pay.select_next();
        assert_eq!(pay.selected, None);

        pay.options = vec![
            CardOption {
                id: 10,
                last4: "1111".to_string(),
            },
            CardOption {
                id: 20,
                last4: "2222".to_string(),
            },
        ];
        pay.select_next();
        assert_eq!(pay.selected, Some(10));
        pay.select_next();
        assert_eq!(pay.selected, Some(20));
        pay.select_next();
        assert_eq!(pay.selected, Some(20));
        pay.select_prev();
        assert_eq!(pay.selected, Some(10));
    }
}
