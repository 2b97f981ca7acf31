extern crate std;

use common::BitWriter;
use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Ledger as _},
    vec,
    xdr::ToXdr,
    Address, Bytes, Env, IntoVal, Val, Vec,
};

use crate::{
    message::{
        self, OP_HALT, OP_PARTIAL_HALT, OP_SET_GOVERNANCE_FEE, OP_SET_SUDOER, OP_SUDO_MESSAGE,
        OP_UPGRADE,
    },
    test::{code_hash, setup, SUDO_QUARANTINE},
    test_sudoer::{Probe, ProbeClient},
    upgrade::{SEND_MODE_IGNORE_ERRORS, SEND_MODE_ORDINARY},
    Continuation, ContractError, DepositSettings, Instruction, InvokeCall, OutboundMessage,
    Operation, RawEvent, RelayedMessage, RoleUpdate, UpgradeRequest,
};

fn body(env: &Env, query_id: u64, operation: &Operation) -> Bytes {
    message::encode(env, query_id, operation).unwrap()
}

fn partial_halt_body(env: &Env, bits: &[bool]) -> Bytes {
    let mut w = BitWriter::new(env);
    message::write_header(&mut w, OP_PARTIAL_HALT, 0).unwrap();
    for bit in bits {
        w.store_bit(*bit);
    }
    w.finish()
}

// ── Malformed input ───────────────────────────────────────────────────────────

#[test]
fn test_unknown_operation() {
    let (env, client, holders) = setup();
    let mut w = BitWriter::new(&env);
    message::write_header(&mut w, 0xdead_beef, 1).unwrap();

    let result = client.try_dispatch(&holders.governor, &w.finish());
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::UnknownOperation),
        _ => unreachable!("Expected UnknownOperation error"),
    }
}

#[test]
fn test_empty_and_untagged_bodies() {
    let (env, client, holders) = setup();

    for raw in [&[][..], &[0x00][..], &[0x13, 0x9a, 0x00][..]] {
        let result = client.try_dispatch(&holders.halter, &Bytes::from_slice(&env, raw));
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::MalformedInput),
            _ => unreachable!("Expected MalformedInput error"),
        }
    }
}

#[test]
fn test_partial_halt_with_trailing_bit_changes_nothing() {
    let (env, client, holders) = setup();
    client.set_deposit_settings(&holders.governor, &0, &true, &true, &None);
    let before = client.get_halt_status();

    let result = client.try_dispatch(
        &holders.halter,
        &partial_halt_body(&env, &[true, true, false]),
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::MalformedInput),
        _ => unreachable!("Expected MalformedInput error"),
    }
    assert_eq!(client.get_halt_status(), before);

    let result = client.try_dispatch(&holders.halter, &partial_halt_body(&env, &[true]));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::MalformedInput),
        _ => unreachable!("Expected MalformedInput error"),
    }
    assert_eq!(client.get_halt_status(), before);

    client.dispatch(&holders.halter, &partial_halt_body(&env, &[true, false]));
    let status = client.get_halt_status();
    assert!(!status.optimistic_deposit_withdrawals);
    assert!(status.deposits_open);
}

#[test]
fn test_halt_with_payload_is_malformed() {
    let (env, client, holders) = setup();
    let mut w = BitWriter::new(&env);
    message::write_header(&mut w, OP_HALT, 0).unwrap();
    w.store_bit(true);

    let result = client.try_dispatch(&holders.halter, &w.finish());
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::MalformedInput),
        _ => unreachable!("Expected MalformedInput error"),
    }
    assert!(!client.is_halted());
}

#[test]
fn test_truncated_fee_is_malformed() {
    let (env, client, holders) = setup();
    let mut w = BitWriter::new(&env);
    message::write_header(&mut w, OP_SET_GOVERNANCE_FEE, 0).unwrap();
    w.store_uint(5, 16).unwrap();

    let result = client.try_dispatch(&holders.governor, &w.finish());
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::MalformedInput),
        _ => unreachable!("Expected MalformedInput error"),
    }
    assert_eq!(client.get_state().governance_fee, 0);
}

#[test]
fn test_garbage_address_reference_is_malformed() {
    let (env, client, holders) = setup();
    let garbage = Bytes::from_slice(&env, &[0xde, 0xad, 0xbe, 0xef]);
    let not_an_address = 7u32.to_xdr(&env);
    let mut truncated = Address::generate(&env).to_xdr(&env);
    truncated.pop_back();

    for blob in [garbage, not_an_address, truncated] {
        let mut w = BitWriter::new(&env);
        message::write_header(&mut w, OP_SET_SUDOER, 0).unwrap();
        w.store_ref(&blob).unwrap();

        let result = client.try_dispatch(&holders.governor, &w.finish());
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::MalformedInput),
            _ => unreachable!("Expected MalformedInput error"),
        }
    }
    assert_eq!(client.get_roles().sudoer, holders.sudoer);
}

#[test]
fn test_garbage_sudo_message_is_malformed() {
    let (env, client, holders) = setup();
    env.ledger().set_timestamp(SUDO_QUARANTINE + 1);

    let mut w = BitWriter::new(&env);
    message::write_header(&mut w, OP_SUDO_MESSAGE, 0).unwrap();
    w.store_uint(u128::from(SEND_MODE_ORDINARY), 8).unwrap();
    w.store_ref(&Bytes::from_slice(&env, &[0x00, 0x00, 0x00, 0x12, 0xff]))
        .unwrap();
    w.store_coins(1).unwrap();
    w.store_ref(&Bytes::new(&env)).unwrap();

    let result = client.try_dispatch(&holders.sudoer, &w.finish());
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::MalformedInput),
        _ => unreachable!("Expected MalformedInput error"),
    }
    assert_eq!(client.get_outbox().len(), 0);
}

#[test]
fn test_garbage_upgrade_payloads_are_malformed() {
    let (env, client, holders) = setup();
    env.ledger().set_timestamp(SUDO_QUARANTINE + 1);
    let garbage = Bytes::from_slice(&env, &[0xde, 0xad, 0xbe, 0xef]);

    // Bad record, then a continuation step with an unknown tag, then a
    // symbol holding a character no symbol may contain.
    let mut bad_step = BitWriter::new(&env);
    bad_step.store_uint(1, 8).unwrap();
    bad_step.store_uint(3, 2).unwrap();

    let mut bad_symbol = BitWriter::new(&env);
    bad_symbol.store_uint(1, 8).unwrap();
    bad_symbol.store_uint(2, 2).unwrap();
    bad_symbol.store_uint(1, 8).unwrap();
    bad_symbol.store_ref(&Bytes::from_slice(&env, b"no-dash")).unwrap();
    bad_symbol.store_ref(&Bytes::new(&env)).unwrap();

    for (data, continuation) in [
        (Some(garbage.clone()), None),
        (None, Some(garbage)),
        (None, Some(bad_step.finish())),
        (None, Some(bad_symbol.finish())),
    ] {
        let mut w = BitWriter::new(&env);
        message::write_header(&mut w, OP_UPGRADE, 0).unwrap();
        w.store_maybe_ref(data.as_ref()).unwrap();
        w.store_bit(false);
        w.store_maybe_ref(continuation.as_ref()).unwrap();

        let result = client.try_dispatch(&holders.sudoer, &w.finish());
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::MalformedInput),
            _ => unreachable!("Expected MalformedInput error"),
        }
    }
    assert_eq!(client.get_state().roles, holders.roles());
    assert_eq!(client.get_code(), code_hash(&env, 1));
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[test]
fn test_dispatch_applies_the_same_guards() {
    let (env, client, holders) = setup();

    let result = client.try_dispatch(&holders.governor, &body(&env, 1, &Operation::Halt));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::WrongSender),
        _ => unreachable!("Expected WrongSender error"),
    }

    client.dispatch(&holders.halter, &body(&env, 2, &Operation::Halt));
    assert!(client.is_halted());

    let result = client.try_dispatch(
        &Address::generate(&env),
        &body(&env, 3, &Operation::Deposit(100)),
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Halted),
        _ => unreachable!("Expected Halted error"),
    }

    client.dispatch(&holders.governor, &body(&env, 4, &Operation::Unhalt));
    assert!(!client.is_halted());
}

#[test]
fn test_dispatch_governance_operations() {
    let (env, client, holders) = setup();
    let approver = Address::generate(&env);

    client.dispatch(
        &holders.governor,
        &body(
            &env,
            10,
            &Operation::SetRoles(RoleUpdate {
                approver: Some(approver.clone()),
                ..RoleUpdate::default()
            }),
        ),
    );
    assert_eq!(client.get_roles().approver, approver);

    client.dispatch(
        &holders.governor,
        &body(
            &env,
            11,
            &Operation::SetDepositSettings(DepositSettings {
                min_msg_value: 1_000_000_000,
                optimistic: true,
                deposits_open: false,
                instant_withdrawal_fee: Some(99),
            }),
        ),
    );
    let state = client.get_state();
    assert_eq!(state.min_msg_value, 1_000_000_000);
    assert!(state.optimistic_deposit_withdrawals);
    assert!(!state.deposits_open);
    assert_eq!(state.instant_withdrawal_fee, 99);

    client.dispatch(
        &holders.interest_manager,
        &body(&env, 12, &Operation::SetInterest(321)),
    );
    assert_eq!(client.get_state().interest_rate, 321);

    let after = 50_000u64;
    client.dispatch(
        &holders.governor,
        &body(&env, 13, &Operation::PrepareGovernanceMigration { after }),
    );
    assert_eq!(client.get_governor_update_after(), after);

    let sudoer = Address::generate(&env);
    client.dispatch(
        &holders.governor,
        &body(&env, 14, &Operation::SetSudoer(sudoer.clone())),
    );
    assert_eq!(client.get_roles().sudoer, sudoer);
}

#[test]
fn test_dispatch_sudo_operations() {
    let (env, client, holders) = setup();
    env.ledger().set_timestamp(SUDO_QUARANTINE + 1);

    let relayed = RelayedMessage {
        mode: SEND_MODE_IGNORE_ERRORS,
        message: OutboundMessage {
            to: Address::generate(&env),
            value: 12_345,
            body: Bytes::from_slice(&env, &[0xca, 0xfe]),
        },
    };
    client.dispatch(
        &holders.sudoer,
        &body(&env, 20, &Operation::SudoMessage(relayed.clone())),
    );
    assert_eq!(client.get_outbox().get(0).unwrap().relayed, relayed);

    let mut next = client.get_state();
    next.interest_rate = 777;
    next.deposits_open = false;
    client.dispatch(
        &holders.sudoer,
        &body(
            &env,
            21,
            &Operation::Upgrade(UpgradeRequest {
                data: Some(next.clone()),
                code: Some(code_hash(&env, 4)),
                continuation: None,
            }),
        ),
    );
    assert_eq!(client.get_state(), next);
    assert_eq!(client.get_code(), code_hash(&env, 4));
}

#[test]
fn test_dispatch_upgrade_runs_encoded_continuation() {
    let (env, client, holders) = setup();
    env.ledger().set_timestamp(SUDO_QUARANTINE + 1);
    let probe_id = env.register(Probe, ());
    let probe = ProbeClient::new(&env, &probe_id);

    let notice = RelayedMessage {
        mode: SEND_MODE_ORDINARY,
        message: OutboundMessage {
            to: Address::generate(&env),
            value: 9,
            body: Bytes::from_slice(&env, b"migrated"),
        },
    };
    let continuation = Continuation {
        steps: vec![
            &env,
            Instruction::Send(notice.clone()),
            Instruction::Invoke(InvokeCall {
                contract: probe_id,
                func: symbol_short!("ping"),
                args: vec![&env, 42u32.into_val(&env)],
            }),
            Instruction::Emit(RawEvent {
                topics: vec![&env, symbol_short!("MIGRATED")],
                data: Bytes::from_slice(&env, b"v2"),
            }),
        ],
    };

    client.dispatch(
        &holders.sudoer,
        &body(
            &env,
            22,
            &Operation::Upgrade(UpgradeRequest {
                data: None,
                code: None,
                continuation: Some(continuation),
            }),
        ),
    );

    assert_eq!(probe.pinged(), Some(42));
    assert_eq!(client.get_last_relayed().unwrap().relayed, notice);
}

#[test]
fn test_encoded_invoke_arguments_decode_unchanged() {
    let env = Env::default();
    let target = Address::generate(&env);
    let args: Vec<Val> = vec![
        &env,
        true.into_val(&env),
        7u32.into_val(&env),
        (-7i32).into_val(&env),
        u64::MAX.into_val(&env),
        i64::MIN.into_val(&env),
        u128::MAX.into_val(&env),
        (-1i128).into_val(&env),
        target.into_val(&env),
        Bytes::from_slice(&env, b"raw").into_val(&env),
        symbol_short!("tag").into_val(&env),
    ];
    let operation = Operation::Upgrade(UpgradeRequest {
        data: None,
        code: None,
        continuation: Some(Continuation {
            steps: vec![
                &env,
                Instruction::Invoke(InvokeCall {
                    contract: target.clone(),
                    func: symbol_short!("call_me"),
                    args: args.clone(),
                }),
            ],
        }),
    });

    let inbound = message::decode(&env, body(&env, 1, &operation)).unwrap();
    let Operation::Upgrade(request) = inbound.operation else {
        unreachable!("Expected an upgrade");
    };
    let step = request.continuation.unwrap().steps.get(0).unwrap();
    let Instruction::Invoke(call) = step else {
        unreachable!("Expected an invoke step");
    };
    assert_eq!(call.contract, target);
    assert_eq!(call.func, symbol_short!("call_me"));
    assert_eq!(call.args.len(), args.len());
    for (decoded, original) in call.args.iter().zip(args.iter()) {
        assert_eq!(decoded.to_xdr(&env), original.to_xdr(&env));
    }
}

#[test]
fn test_decode_reads_header() {
    let env = Env::default();
    let encoded = body(&env, 0xabcd, &Operation::ControllerDeployRequest(3));
    let inbound = message::decode(&env, encoded).unwrap();

    assert_eq!(inbound.op, message::OP_CONTROLLER_DEPLOY_REQUEST);
    assert_eq!(inbound.query_id, 0xabcd);
    assert!(matches!(
        inbound.operation,
        Operation::ControllerDeployRequest(3)
    ));
}
