use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–3) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidConfig = 3,

    // --- Authorization (4) ---
    Unauthorized = 4,

    // --- Phase creation (5–8) ---
    InvalidDiscount = 5,
    InvalidEndTime = 6,
    InvalidAmount = 7,
    InsufficientUnallocatedSupply = 8,

    // --- Purchase (9–12) ---
    BelowMinimumPurchase = 9,
    SaleClosed = 10,
    InsufficientPayment = 11,
    InsufficientPhaseSupply = 12,

    // --- Collaborators (13–14) ---
    LedgerTransferFailed = 13,
    CurrencyTransferFailed = 14,

    // --- Queries and arithmetic (15–16) ---
    PhaseNotFound = 15,
    ArithmeticOverflow = 16,
}
