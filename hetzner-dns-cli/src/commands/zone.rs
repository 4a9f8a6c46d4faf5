use std::sync::Arc;

use hetzner_dns_core::types::{CreateZoneRequest, UpdateZoneRequest, Zone};
use hetzner_dns_core::{Resolved, ServiceContext, ZoneService};

use crate::cli::ZoneCommand;
use crate::output::Output;

pub async fn run(ctx: Arc<ServiceContext>, cmd: ZoneCommand) -> anyhow::Result<Output> {
    let service = ZoneService::new(ctx);

    let output = match cmd {
        ZoneCommand::List { output } => {
            let zones = service.list_zones().await?;
            if output.id_only {
                Output::Ids(Resolved::Many(zones.into_iter().map(|z| z.id).collect()))
            } else {
                Output::Zones(zones)
            }
        }
        ZoneCommand::Get { zone, output } => {
            let selector = zone.selector()?;
            if output.id_only {
                Output::Ids(Resolved::One(service.resolve_zone_id(&selector).await?))
            } else {
                Output::Zone(service.get_zone(&selector).await?)
            }
        }
        ZoneCommand::Create { name, ttl, output } => {
            let zone = service.create_zone(CreateZoneRequest { name, ttl }).await?;
            zone_output(zone, output.id_only)
        }
        ZoneCommand::Update {
            zone,
            new_name,
            ttl,
            output,
        } => {
            let request = UpdateZoneRequest {
                name: new_name,
                ttl,
            };
            if request.is_empty() {
                anyhow::bail!("Nothing to update: pass --new-name and/or --ttl");
            }
            let zone = service.update_zone(&zone.selector()?, request).await?;
            zone_output(zone, output.id_only)
        }
        ZoneCommand::Delete { zone } => {
            let deleted = service.delete_zone(&zone.selector()?).await?;
            tracing::info!("Deleted zone {deleted}");
            Output::Ok
        }
    };
    Ok(output)
}

fn zone_output(zone: Zone, id_only: bool) -> Output {
    if id_only {
        Output::Ids(Resolved::One(zone.id))
    } else {
        Output::Zone(zone)
    }
}
