pub struct Beta191Selectors;

impl Beta191Selectors {
    // Login
    pub const AGE_GATE_YES: &'static str = "ใช่";
    pub const USERNAME_TEXTBOX: &'static str = "Mobile Number";
    pub const PASSWORD_TEXTBOX: &'static str = "Enter Your Password";
    pub const SKIP_AD_TEXT: &'static str = "Skip For Later";
    pub const DEPOSIT_BUTTON_TEXT: &'static str = "Deposit";

    // Deposit page: one tile per gateway, identified by its logo image
    pub const METHOD_CONTAINER: &'static str = "div.grid.overflow-y-auto.light-scrollbar";
    pub const METHOD_TILES: &'static str = "div.deposit-channel.relative";
    pub const CHANNEL_TITLE: &'static str =
        "span.text-sm.capitalize.font-medium.deposit-text-title";
    pub const AMOUNT_INPUT: &'static str = "input.o-input.deposit-amount-input-staging";
    pub const AMOUNT_INPUT_FALLBACK: &'static str = "input.deposit-amount-input";
    pub const AMOUNT_RANGE: &'static str = "div.flex.justify-end.font-light";
    pub const SUBMIT_BUTTON: &'static str = "button.deposit_ok_btn";
}
