use highway_lib::{CommandStream, Registry, RegistryConfig, Response};

fn run_script(registry: &mut Registry, script: &str) -> Vec<String> {
    CommandStream::new(script)
        .map(|command| {
            command
                .expect("script is well formed")
                .execute(registry)
                .to_string()
        })
        .collect()
}

#[test]
fn full_session_matches_reference_output() {
    let script = "\
aggiungi-stazione 20 3 5 10 15
aggiungi-stazione 4 3 1 2 3
aggiungi-stazione 30 0
demolisci-stazione 3
demolisci-stazione 4
aggiungi-auto 30 40
aggiungi-auto 31 40
aggiungi-stazione 50 3 20 25 7
rottama-auto 20 8
rottama-auto 9999 5
aggiungi-auto 20 30
aggiungi-stazione 45 1 10
aggiungi-stazione 30 0
pianifica-percorso 20 50
pianifica-percorso 50 30
rottama-auto 20 30
pianifica-percorso 20 50
pianifica-percorso 45 20
pianifica-percorso 30 30
pianifica-percorso 30 31
";
    let mut registry = Registry::default();
    let output = run_script(&mut registry, script);
    assert_eq!(
        output,
        vec![
            "aggiunta",
            "aggiunta",
            "aggiunta",
            "non demolita",
            "demolita",
            "aggiunta",
            "non aggiunta",
            "aggiunta",
            "non rottamata",
            "non rottamata",
            "aggiunta",
            "aggiunta",
            "non aggiunta",
            "20 50",
            "50 30",
            "rottamata",
            "20 30 50",
            "nessun percorso",
            "30",
            "nessun percorso",
        ]
    );
    assert!(registry.index().check_invariants().is_ok());
}

#[test]
fn full_fleet_rejects_new_vehicle() {
    let config = RegistryConfig::with_fleet_capacity(2).expect("valid");
    let mut registry = Registry::new(config);
    let output = run_script(
        &mut registry,
        "add-station 1 2 5 6 add-vehicle 1 7 scrap-vehicle 1 5 add-vehicle 1 7 plan-route 1 1",
    );
    assert_eq!(
        output,
        vec!["aggiunta", "non aggiunta", "rottamata", "aggiunta", "1"]
    );
}

#[test]
fn malformed_commands_are_reported_and_skipped() {
    let mut registry = Registry::default();
    let results: Vec<_> = CommandStream::new("aggiungi-stazione x 0 aggiungi-stazione 1 0")
        .collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_err());
    let response = results[1]
        .as_ref()
        .expect("second command parses")
        .execute(&mut registry);
    assert_eq!(response, Response::Added(true));
    assert!(response.succeeded());
}
