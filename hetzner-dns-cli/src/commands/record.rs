use std::sync::Arc;

use hetzner_dns_core::resolver::Criteria;
use hetzner_dns_core::types::{
    CreateRecordRequest, DeleteTarget, Record, RecordLookup, RecordScope, UpdateRecordRequest,
};
use hetzner_dns_core::{
    MultiplicityPolicy, RecordFilter, RecordService, Resolved, ServiceContext,
};

use crate::cli::RecordCommand;
use crate::output::Output;

pub async fn run(ctx: Arc<ServiceContext>, cmd: RecordCommand) -> anyhow::Result<Output> {
    let service = RecordService::new(ctx);

    let output = match cmd {
        RecordCommand::List {
            scope,
            filter,
            output,
        } => {
            let lookup = RecordLookup {
                zone_id: scope.zone_id,
                zone_name: scope.zone_name,
                filter: filter.to_filter(),
                search_all_zones: scope.search_all_zones,
                policy: MultiplicityPolicy::AllowMultiple,
                ..Default::default()
            };
            // Nothing to narrow by: every record in the account
            let records = if lookup.is_scoped() || !lookup.filter.is_empty() {
                service.get_record(&lookup).await?.into_vec()
            } else {
                service.list_records(&RecordScope::AllZones).await?
            };
            if output.id_only {
                Output::Ids(Resolved::Many(records.into_iter().map(|r| r.id).collect()))
            } else {
                Output::RecordList(records)
            }
        }
        RecordCommand::Get {
            lookup,
            filter,
            policy,
            output,
        } => {
            let lookup = lookup.to_lookup(filter.to_filter(), policy.policy()?);
            if output.id_only {
                Output::Ids(service.get_record_ids(&lookup).await?)
            } else {
                Output::Records(service.get_record(&lookup).await?)
            }
        }
        RecordCommand::Create {
            scope,
            record_type,
            name,
            value,
            ttl,
            output,
        } => {
            let record = service
                .create_record(CreateRecordRequest {
                    zone: scope.selector()?,
                    record_type,
                    name,
                    value,
                    ttl,
                })
                .await?;
            record_output(record, output.id_only)
        }
        RecordCommand::Update {
            lookup,
            name,
            record_type,
            value,
            ttl,
            new_name,
            policy,
            output,
        } => {
            // The record is found by name; type, value and TTL are new values
            let filter = RecordFilter {
                name: name.clone(),
                ..Default::default()
            };
            let request = UpdateRecordRequest {
                target: lookup.to_lookup(filter, policy.policy()?),
                zone: None,
                record_type,
                name: new_name.or(name),
                value,
                ttl,
            };
            record_output(service.update_record(request).await?, output.id_only)
        }
        RecordCommand::Delete {
            lookup,
            record_ids,
            filter,
            policy,
            delete_multiple_records,
        } => {
            let target = if let Some(id) = lookup.record_id.clone() {
                DeleteTarget::Id(id)
            } else if record_ids.is_empty() {
                // Only --delete-multiple-records lets a lookup delete several records
                policy.policy()?;
                let policy = MultiplicityPolicy::from_flags(
                    policy.first_record_only,
                    delete_multiple_records,
                )?;
                DeleteTarget::Lookup(lookup.to_lookup(filter.to_filter(), policy))
            } else {
                DeleteTarget::Ids(record_ids)
            };
            let outcome = service.delete_records(target).await?;
            tracing::info!("Deleted {} record(s): {:?}", outcome.deleted.len(), outcome.deleted);
            Output::Ok
        }
    };
    Ok(output)
}

fn record_output(record: Record, id_only: bool) -> Output {
    if id_only {
        Output::Ids(Resolved::One(record.id))
    } else {
        Output::Records(Resolved::One(record))
    }
}
