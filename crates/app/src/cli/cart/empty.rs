use carthorse_app::{context::AppContext, domain::users::records::UserUuid};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct EmptyCartArgs {
    /// Cart owner UUID
    #[arg(long)]
    user: UserUuid,
}

pub(crate) async fn run(args: EmptyCartArgs, ctx: &AppContext) -> Result<(), String> {
    let removed = ctx
        .cart_for(args.user)
        .empty()
        .await
        .map_err(|error| format!("failed to empty cart: {error}"))?;

    println!("removed lines: {removed}");

    Ok(())
}
