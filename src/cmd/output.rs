use clap::ValueEnum;
use color_eyre::eyre::Result;
use eniconf_metadata::InstanceIdentity;
use eniconf_types::Eni;
use serde::Serialize;
use std::fmt::{Display, Write as _};

/// How results are printed on stdout
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable text
    #[default]
    Text,
}

/// Print `value` as JSON, or as the text produced by `text`
pub fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text(value)),
    }
    Ok(())
}

pub fn eni_text(eni: &Eni) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id:            {}", eni.id);
    let _ = writeln!(out, "mac:           {}", eni.mac);
    let _ = writeln!(out, "primary ip:    {}", eni.primary_ip.ipv4);
    let _ = writeln!(out, "gateway:       {}", eni.gateway_ip.ipv4);
    let _ = writeln!(out, "vswitch:       {}", eni.vswitch);
    let _ = writeln!(out, "vswitch cidr:  {}", eni.vswitch_cidr.ipv4);
    if let Some((gateway, cidr)) = eni.ipv6() {
        let _ = writeln!(out, "ipv6 gateway:  {gateway}");
        let _ = writeln!(out, "ipv6 cidr:     {cidr}");
    }
    out
}

/// One interface per line: id, mac, primary ip, vswitch, vswitch cidr
pub fn eni_table(enis: &[Eni]) -> String {
    enis.iter()
        .map(|eni| {
            format!(
                "{}\t{}\t{}\t{}\t{}\n",
                eni.id, eni.mac, eni.primary_ip.ipv4, eni.vswitch, eni.vswitch_cidr.ipv4
            )
        })
        .collect()
}

pub fn lines<T: Display>(items: &[T]) -> String {
    items.iter().map(|item| format!("{item}\n")).collect()
}

pub fn identity_text(identity: &InstanceIdentity) -> String {
    let unknown = "-";
    let mut out = String::new();
    let _ = writeln!(out, "primary mac:   {}", identity.primary_mac);
    let _ = writeln!(
        out,
        "instance id:   {}",
        identity.instance_id.as_deref().unwrap_or(unknown)
    );
    let _ = writeln!(
        out,
        "region:        {}",
        identity.region_id.as_deref().unwrap_or(unknown)
    );
    let _ = writeln!(
        out,
        "zone:          {}",
        identity.zone_id.as_deref().unwrap_or(unknown)
    );
    let _ = writeln!(
        out,
        "instance type: {}",
        identity.instance_type.as_deref().unwrap_or(unknown)
    );
    out
}
