use anyhow::Result;
use claim::prelude::*;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::app::App;

pub(crate) async fn print(app: &App, wallet: Option<Address>) -> Result<()> {
    let view = app.claim_view(wallet).await;
    println!("{}", render(app.config(), wallet, &view));
    Ok(())
}

fn render(config: &DropConfig, wallet: Option<Address>, view: &ClaimView) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Field", "Value"]);

    let wallet = wallet.map_or_else(|| "not connected".to_owned(), |wallet| wallet.to_string());
    let name = view
        .metadata
        .as_ref()
        .map_or("", |metadata| metadata.name.as_str());
    let notices = view
        .notices
        .iter()
        .map(|notice| notice.message())
        .collect::<Vec<_>>()
        .join("\n");

    let rows: [(&str, String); 12] = [
        ("Contract", config.contract.to_string()),
        ("Name", name.to_owned()),
        ("Wallet", wallet),
        ("Quantity", config.quantity.to_string()),
        ("Button", view.button.label.clone()),
        ("Disabled", view.button.disabled.to_string()),
        ("Loading", view.button.loading.to_string()),
        ("Sold out", view.sold_out.to_string()),
        ("Claimed", view.supply.claimed.to_string()),
        ("Total", view.supply.total_display()),
        ("Price", view.price_to_claim.clone()),
        ("Notices", notices),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_owned(), value]);
    }
    table
}
