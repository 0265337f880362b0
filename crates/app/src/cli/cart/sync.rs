use carthorse_app::{context::AppContext, domain::users::records::UserUuid};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct SyncCartArgs {
    /// Cart owner UUID
    #[arg(long)]
    user: UserUuid,
}

pub(crate) async fn run(args: SyncCartArgs, ctx: &AppContext) -> Result<(), String> {
    let mut cart = ctx.cart_for(args.user);

    cart.sync()
        .await
        .map_err(|error| format!("failed to sync cart: {error}"))?;

    if cart.has_changed() {
        println!("cart changed: quantities were reduced to match availability");
    } else {
        println!("cart unchanged");
    }

    Ok(())
}
