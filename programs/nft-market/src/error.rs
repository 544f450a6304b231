use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Instruction invoked without a valid admin.")]
    Unauthorized,
    #[msg("Signing account cannot remove itself.")]
    CannotRemoveSelf,
    #[msg("Cannot purchase from selected collection with specified Mint.")]
    InvalidPurchaseMint,
    #[msg("Overflow when applying an arithmetic operation.")]
    Overflow,
    #[msg("Admin address was not found in market whitelist.")]
    AdminNotFound,
    #[msg("Admin whitelist exceeded max length of 16.")]
    AdminOutOfBounds,
    #[msg("Collections cannot be closed until all NFTs are removed.")]
    CollectionNonEmpty,
    #[msg("Title exceeds max length of 32 bytes.")]
    TitleTooLong,
    #[msg("Price model exceeded max length of 8 sale prices.")]
    TooManySalePrices,
    #[msg("List item is not linked where expected.")]
    InvalidListItem,
    #[msg("Rent refund account does not match the listing payer.")]
    RentRefundMismatch,
    #[msg("Source token account must hold exactly one unit of the NFT.")]
    InvalidNftAmount,
}
