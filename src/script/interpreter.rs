//! Script evaluation for the opcodes the HTLC and synod templates emit.
//!
//! Witness-program rules are applied: `OP_IF`/`OP_NOTIF` arguments must be
//! empty or `0x01`, a failed signature check must use an empty signature, and
//! `eval_witness` requires a clean stack.

use crate::script::{op_codes::*, stack::*, Checker};
use crate::transaction::Witness;
use crate::util::{hash160, sha256, Error, Result};
use bitcoin_hashes::{ripemd160 as bh_ripemd160, Hash as BHHash};
use log::trace;

/// Evaluates `script` starting from `stack` (bottom item first).
///
/// Succeeds if execution completes with a true value on top of the stack.
pub fn eval<T: Checker>(script: &[u8], stack: Vec<Vec<u8>>, checker: &mut T) -> Result<()> {
    let stack = run(script, stack, checker)?;
    match stack.last() {
        Some(top) if decode_bool(top) => Ok(()),
        Some(_) => Err(Error::ScriptError("Top of stack is false".to_string())),
        None => Err(Error::ScriptError("Stack too small: 1".to_string())),
    }
}

/// Evaluates a pay-to-witness-script-hash witness: the last item is the script,
/// the items before it form the initial stack.
///
/// # Errors
/// `Error::ScriptError` if the witness is empty, the script fails, or the stack
/// does not finish with exactly one true item.
pub fn eval_witness<T: Checker>(witness: &Witness, checker: &mut T) -> Result<()> {
    let (script, items) = witness
        .items()
        .split_last()
        .ok_or(Error::ScriptError("Empty witness".to_string()))?;
    trace!("evaluating witness script of {} bytes with {} stack items", script.len(), items.len());
    let stack = run(script, items.to_vec(), checker)?;
    if stack.len() != 1 {
        return Err(Error::ScriptError(format!("Stack not clean: {} items", stack.len())));
    }
    if !decode_bool(&stack[0]) {
        return Err(Error::ScriptError("Top of stack is false".to_string()));
    }
    Ok(())
}

fn run<T: Checker>(script: &[u8], mut stack: Vec<Vec<u8>>, checker: &mut T) -> Result<Vec<Vec<u8>>> {
    let mut branch_exec: Vec<bool> = Vec::new();
    let mut i = 0;
    while i < script.len() {
        if !branch_exec.is_empty() && !branch_exec[branch_exec.len() - 1] {
            i = skip_branch(script, i);
            if i >= script.len() {
                break;
            }
        }
        match script[i] {
            OP_0 => stack.push(vec![]),
            len @ 1..=75 => {
                remains(i + 1, len as usize, script)?;
                stack.push(script[i + 1..i + 1 + len as usize].to_vec());
            }
            OP_PUSHDATA1 => {
                remains(i + 1, 1, script)?;
                let len = script[i + 1] as usize;
                remains(i + 2, len, script)?;
                stack.push(script[i + 2..i + 2 + len].to_vec());
            }
            OP_PUSHDATA2 => {
                remains(i + 1, 2, script)?;
                let len = u16::from_le_bytes([script[i + 1], script[i + 2]]) as usize;
                remains(i + 3, len, script)?;
                stack.push(script[i + 3..i + 3 + len].to_vec());
            }
            OP_PUSHDATA4 => {
                remains(i + 1, 4, script)?;
                let len = u32::from_le_bytes([script[i + 1], script[i + 2], script[i + 3], script[i + 4]]) as usize;
                remains(i + 5, len, script)?;
                stack.push(script[i + 5..i + 5 + len].to_vec());
            }
            OP_1NEGATE => stack.push(encode_num(-1)),
            n @ OP_1..=OP_16 => stack.push(encode_num((n - OP_1 + 1) as i64)),
            OP_NOP => {}
            op @ (OP_IF | OP_NOTIF) => {
                let top = stack.pop().ok_or(Error::ScriptError("Empty stack for bool".to_string()))?;
                if !(top.is_empty() || top == [1]) {
                    return Err(Error::ScriptError("OP_IF argument must be minimal".to_string()));
                }
                let cond = !top.is_empty();
                branch_exec.push(if op == OP_IF { cond } else { !cond });
            }
            OP_ELSE => {
                let len = branch_exec.len();
                if len == 0 {
                    let msg = "ELSE found without matching IF".to_string();
                    return Err(Error::ScriptError(msg));
                }
                branch_exec[len - 1] = !branch_exec[len - 1];
            }
            OP_ENDIF => {
                if branch_exec.pop().is_none() {
                    let msg = "ENDIF found without matching IF".to_string();
                    return Err(Error::ScriptError(msg));
                }
            }
            OP_VERIFY => {
                if !pop_bool(&mut stack)? {
                    return Err(Error::ScriptError("OP_VERIFY failed".to_string()));
                }
            }
            OP_DROP => {
                pop(&mut stack)?;
            }
            OP_DUP => {
                check_stack_size(1, &stack)?;
                let copy = stack[stack.len() - 1].clone();
                stack.push(copy);
            }
            OP_SWAP => {
                check_stack_size(2, &stack)?;
                let len = stack.len();
                stack.swap(len - 1, len - 2);
            }
            op @ (OP_EQUAL | OP_EQUALVERIFY) => {
                let b = pop(&mut stack)?;
                let a = pop(&mut stack)?;
                if op == OP_EQUALVERIFY {
                    if a != b {
                        return Err(Error::ScriptError("OP_EQUALVERIFY failed".to_string()));
                    }
                } else {
                    stack.push(encode_num((a == b) as i64));
                }
            }
            op @ (OP_ADD | OP_SUB | OP_NUMEQUAL | OP_LESSTHAN | OP_GREATERTHAN | OP_GREATERTHANOREQUAL) => {
                check_stack_size(2, &stack)?;
                let b = pop_num(&mut stack, MAX_NUM_LEN)?;
                let a = pop_num(&mut stack, MAX_NUM_LEN)?;
                let result = match op {
                    OP_ADD => a + b,
                    OP_SUB => a - b,
                    OP_NUMEQUAL => (a == b) as i64,
                    OP_LESSTHAN => (a < b) as i64,
                    OP_GREATERTHAN => (a > b) as i64,
                    _ => (a >= b) as i64,
                };
                stack.push(encode_num(result));
            }
            OP_RIPEMD160 => {
                let v = pop(&mut stack)?;
                let h = bh_ripemd160::Hash::hash(&v).to_byte_array();
                stack.push(h.to_vec());
            }
            OP_SHA256 => {
                let v = pop(&mut stack)?;
                stack.push(sha256(&v).0.to_vec());
            }
            OP_HASH160 => {
                let v = pop(&mut stack)?;
                stack.push(hash160(&v).0.to_vec());
            }
            op @ (OP_CHECKSIG | OP_CHECKSIGVERIFY) => {
                check_stack_size(2, &stack)?;
                let pubkey = pop(&mut stack)?;
                let sig = pop(&mut stack)?;
                let success = checker.check_sig(&sig, &pubkey, script)?;
                if !success && !sig.is_empty() {
                    return Err(Error::ScriptError("Non-empty signature failed".to_string()));
                }
                if op == OP_CHECKSIGVERIFY {
                    if !success {
                        return Err(Error::ScriptError("OP_CHECKSIGVERIFY failed".to_string()));
                    }
                } else {
                    stack.push(encode_num(success as i64));
                }
            }
            OP_CHECKLOCKTIMEVERIFY => {
                check_stack_size(1, &stack)?;
                let locktime = decode_num(&stack[stack.len() - 1], MAX_LOCKTIME_LEN)?;
                if !checker.check_locktime(locktime)? {
                    let msg = "OP_CHECKLOCKTIMEVERIFY failed".to_string();
                    return Err(Error::ScriptError(msg));
                }
            }
            op => return Err(Error::ScriptError(format!("Unsupported opcode: {}, index {}", op, i))),
        }
        i = next_op(i, script);
    }
    if !branch_exec.is_empty() {
        return Err(Error::ScriptError("Unmatched ENDIF".to_string()));
    }
    Ok(stack)
}

#[inline]
fn pop(stack: &mut Vec<Vec<u8>>) -> Result<Vec<u8>> {
    stack.pop().ok_or(Error::ScriptError("Stack too small: 1".to_string()))
}

#[inline]
fn check_stack_size(minsize: usize, stack: &[Vec<u8>]) -> Result<()> {
    if stack.len() < minsize {
        let msg = format!("Stack too small: {}", minsize);
        return Err(Error::ScriptError(msg));
    }
    Ok(())
}

#[inline]
fn remains(i: usize, len: usize, script: &[u8]) -> Result<()> {
    if i + len > script.len() {
        Err(Error::ScriptError("Not enough data remaining".to_string()))
    } else {
        Ok(())
    }
}

/// Gets the next operation index in the script, or the script length if at the end
pub fn next_op(i: usize, script: &[u8]) -> usize {
    if i >= script.len() {
        return script.len();
    }
    let op = script[i];
    let next = match op {
        len @ 1..=75 => i + 1 + len as usize,
        OP_PUSHDATA1 => {
            if i + 2 > script.len() {
                script.len()
            } else {
                i + 2 + script[i + 1] as usize
            }
        }
        OP_PUSHDATA2 => {
            if i + 3 > script.len() {
                script.len()
            } else {
                i + 3 + u16::from_le_bytes([script[i + 1], script[i + 2]]) as usize
            }
        }
        OP_PUSHDATA4 => {
            if i + 5 > script.len() {
                script.len()
            } else {
                i + 5 + u32::from_le_bytes([script[i + 1], script[i + 2], script[i + 3], script[i + 4]]) as usize
            }
        }
        _ => i + 1,
    };
    next.min(script.len())
}

/// Skips the current branch to the matching ELSE or ENDIF.
fn skip_branch(script: &[u8], mut i: usize) -> usize {
    let mut depth = 0;
    while i < script.len() {
        let op = script[i];
        match op {
            OP_IF | OP_NOTIF => depth += 1,
            OP_ELSE if depth == 0 => return i,
            OP_ENDIF if depth == 0 => return i,
            OP_ENDIF => depth -= 1,
            _ => {}
        }
        i = next_op(i, script);
    }
    script.len()
}
